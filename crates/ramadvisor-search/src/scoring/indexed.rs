use crate::embed::fit_dimension;
use crate::vocab;
use ramadvisor_core::Chunk;
use std::collections::HashSet;
use std::sync::Arc;

/// A chunk plus the per-chunk features scoring needs, computed once at
/// initialization.
#[derive(Debug, Clone)]
pub struct IndexedChunk {
    pub chunk: Arc<Chunk>,
    /// Lowercased chunk text.
    pub text_lower: String,
    /// Words longer than three characters plus the chunk's own keywords.
    pub search_terms: Vec<String>,
    /// Share of the richness vocabulary present in the text, in `[0, 1]`.
    pub richness: f32,
    pub category_weight: f32,
    /// Text carries source-language vocabulary.
    pub has_source_terms: bool,
    /// Source-term matching applies to this chunk: it carries source-language
    /// vocabulary and came from an enriched export.
    pub source_term_eligible: bool,
    /// Stored embedding fitted to the working dimension.
    pub embedding: Option<Vec<f32>>,
}

impl IndexedChunk {
    #[must_use]
    pub fn new(chunk: Chunk, source_enriched: bool, dimension: usize) -> Self {
        let text_lower = chunk.text.to_lowercase();
        let search_terms = search_terms(&text_lower, &chunk.keywords);

        let rich = vocab::RICHNESS_TERMS
            .iter()
            .filter(|term| text_lower.contains(*term))
            .count();
        let richness = rich as f32 / vocab::RICHNESS_TERMS.len() as f32;

        let has_source_terms = chunk.enriched_with_french
            || text_lower.contains(vocab::SOURCE_TERMS_MARKER)
            || vocab::SOURCE_TERM_HINTS
                .iter()
                .any(|term| text_lower.contains(term));
        let source_term_eligible =
            has_source_terms && (source_enriched || chunk.enriched_with_french);

        let category_weight = vocab::category_weight(chunk.topic_category.as_deref());
        let embedding = chunk
            .embedding
            .clone()
            .filter(|values| !values.is_empty())
            .map(|values| fit_dimension(values, dimension));

        Self {
            chunk: Arc::new(chunk),
            text_lower,
            search_terms,
            richness,
            category_weight,
            has_source_terms,
            source_term_eligible,
            embedding,
        }
    }

    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.text_lower.contains(needle)
    }
}

fn search_terms(text_lower: &str, keywords: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    text_lower
        .split_whitespace()
        .filter(|word| word.chars().count() > 3)
        .map(str::to_string)
        .chain(keywords.iter().map(|keyword| keyword.to_lowercase()))
        .filter(|term| seen.insert(term.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precomputes_features() {
        let chunk = Chunk::new("Portfolio risk and investment strategy for the client")
            .with_category("Risk Management")
            .with_keywords(["Hedging"]);
        let indexed = IndexedChunk::new(chunk, false, 50);

        assert!((indexed.richness - 4.0 / 6.0).abs() < 1e-6);
        assert!((indexed.category_weight - 0.9).abs() < 1e-6);
        assert!(indexed.search_terms.contains(&"portfolio".to_string()));
        assert!(indexed.search_terms.contains(&"hedging".to_string()));
        assert!(!indexed.search_terms.contains(&"and".to_string()));
        assert!(!indexed.has_source_terms);
        assert!(indexed.embedding.is_none());
    }

    #[test]
    fn source_terms_need_enriched_origin_to_count() {
        let chunk = Chunk::new("Asset allocation basics [Termes FR: portefeuille]");
        let plain = IndexedChunk::new(chunk.clone(), false, 50);
        assert!(plain.has_source_terms);
        assert!(!plain.source_term_eligible);

        let enriched = IndexedChunk::new(chunk, true, 50);
        assert!(enriched.source_term_eligible);
    }

    #[test]
    fn embedding_is_fitted_to_dimension() {
        let chunk = Chunk::new("x").with_embedding(vec![0.5; 384]);
        let indexed = IndexedChunk::new(chunk, false, 50);
        assert_eq!(indexed.embedding.as_ref().map(Vec::len), Some(50));

        let empty = IndexedChunk::new(Chunk::new("x").with_embedding(Vec::new()), false, 50);
        assert!(empty.embedding.is_none());
    }
}
