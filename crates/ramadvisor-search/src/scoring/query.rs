use crate::embed::{EmbeddingModel, fit_dimension};
use crate::translate::{TermTranslator, extract_keywords, is_word_char};
use crate::vocab;
use ramadvisor_core::{RiskProfile, SearchConfig};
use std::collections::HashSet;
use tracing::warn;

/// A query with everything scoring needs derived up front: translation,
/// keywords, variants and variant embeddings.
#[derive(Debug, Clone, Default)]
pub struct PreparedQuery {
    pub original: String,
    pub lower: String,
    /// Translated query. Equal to `lower` when translation is disabled.
    pub translated: String,
    /// Translated query with punctuation removed, matched verbatim against
    /// chunk text.
    pub direct_needle: String,
    pub keywords: Vec<String>,
    /// Whitespace tokens of the original query, lowercased.
    pub tokens: Vec<String>,
    /// Reformulations, original first, deduplicated.
    pub variants: Vec<String>,
    /// One embedding per variant that embedded successfully.
    pub embeddings: Vec<Vec<f32>>,
    pub profile: RiskProfile,
    /// Translation and source-language signals are active.
    pub multilingual: bool,
}

impl PreparedQuery {
    #[must_use]
    pub fn new(
        query: &str,
        profile: RiskProfile,
        config: &SearchConfig,
        translator: &TermTranslator,
        embedder: &dyn EmbeddingModel,
    ) -> Self {
        let lower = query.trim().to_lowercase();
        let multilingual = config.mode.is_multilingual();

        let (translated, keywords, variants) = if multilingual {
            let translation = translator.translate(query);
            let variants = variants(&lower, query, &translation.translated, &translation.keywords);
            (translation.translated, translation.keywords, variants)
        } else {
            (lower.clone(), extract_keywords(query), dedup_variants([query.trim().to_string()]))
        };

        let direct_needle = strip_punctuation(&translated);
        let tokens = lower.split_whitespace().map(str::to_string).collect();
        let embeddings = embed_variants(&variants, embedder);

        Self {
            original: query.to_string(),
            lower,
            translated,
            direct_needle,
            keywords,
            tokens,
            variants,
            embeddings,
            profile,
            multilingual,
        }
    }

    /// Original and translated query together, for category detection.
    #[must_use]
    pub fn category_haystack(&self) -> String {
        format!("{} {}", self.translated.to_lowercase(), self.lower)
    }
}

fn variants(lower: &str, original: &str, translated: &str, keywords: &[String]) -> Vec<String> {
    let mut candidates = vec![
        original.trim().to_string(),
        translated.to_string(),
        keywords.join(" "),
        expand_concepts(lower),
    ];

    for profile in RiskProfile::ALL {
        if profile.query_names().iter().any(|name| lower.contains(name)) {
            candidates.push(vocab::profile_anchor(profile).to_string());
        }
    }

    dedup_variants(candidates)
}

/// The query followed by the English expansion of every source-language
/// concept it mentions.
fn expand_concepts(lower: &str) -> String {
    let mut expanded = lower.to_string();
    for (term, expansion) in vocab::CONCEPT_EXPANSIONS {
        if lower.contains(term) {
            expanded.push(' ');
            expanded.push_str(expansion);
        }
    }
    expanded
}

fn dedup_variants(candidates: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|variant| !variant.trim().is_empty())
        .filter(|variant| seen.insert(variant.clone()))
        .collect()
}

fn embed_variants(variants: &[String], embedder: &dyn EmbeddingModel) -> Vec<Vec<f32>> {
    let dimension = embedder.dimension();
    variants
        .iter()
        .filter_map(|variant| match embedder.embed(variant) {
            Ok(vector) => Some(fit_dimension(vector, dimension)),
            Err(err) => {
                warn!("embedding failed for query variant, skipping it: {err:#}");
                None
            }
        })
        .collect()
}

fn strip_punctuation(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| is_word_char(*c) || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::PseudoEmbedder;
    use anyhow::bail;

    fn prepare(query: &str, config: &SearchConfig) -> PreparedQuery {
        PreparedQuery::new(
            query,
            RiskProfile::Balanced,
            config,
            &TermTranslator::new(),
            &PseudoEmbedder::from_config(config),
        )
    }

    #[test]
    fn multilingual_query_has_ordered_unique_variants() {
        let q = prepare("Portefeuille prudent", &SearchConfig::default());
        assert_eq!(q.variants[0], "Portefeuille prudent");
        assert_eq!(q.variants[1], q.translated);
        assert!(q.variants.iter().any(|v| v.contains("portfolio allocation diversification")));
        assert!(
            q.variants
                .iter()
                .any(|v| v == "conservative investment risk management portfolio")
        );
        let unique: HashSet<_> = q.variants.iter().collect();
        assert_eq!(unique.len(), q.variants.len());
        assert_eq!(q.embeddings.len(), q.variants.len());
    }

    #[test]
    fn basic_mode_skips_translation() {
        let q = prepare("Allocation de Portefeuille!", &SearchConfig::basic());
        assert!(!q.multilingual);
        assert_eq!(q.variants, vec!["Allocation de Portefeuille!"]);
        assert_eq!(q.translated, "allocation de portefeuille!");
        assert_eq!(q.direct_needle, "allocation de portefeuille");
        assert_eq!(q.keywords, vec!["allocation", "portefeuille"]);
    }

    #[test]
    fn blank_query_has_no_variants() {
        let q = prepare("   ", &SearchConfig::default());
        assert!(q.variants.is_empty());
        assert!(q.embeddings.is_empty());
        assert!(q.direct_needle.is_empty());
        assert!(q.tokens.is_empty());
    }

    struct FailingModel;

    impl EmbeddingModel for FailingModel {
        fn dimension(&self) -> usize {
            50
        }

        fn embed(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
            bail!("model offline")
        }
    }

    #[test]
    fn embedding_failures_drop_only_the_vectors() {
        let q = PreparedQuery::new(
            "retraite",
            RiskProfile::Balanced,
            &SearchConfig::default(),
            &TermTranslator::new(),
            &FailingModel,
        );
        assert!(!q.variants.is_empty());
        assert!(q.embeddings.is_empty());
    }
}
