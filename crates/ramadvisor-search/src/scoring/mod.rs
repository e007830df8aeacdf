//! Per-chunk relevance scoring.
//!
//! A chunk's score is the sum of independent signals (see
//! [`ScoreBreakdown`]). Each signal is a pure function of the
//! [`PreparedQuery`] and the [`IndexedChunk`], so scores are deterministic
//! and every signal can be inspected on its own.

mod indexed;
mod query;

pub use indexed::IndexedChunk;
pub use query::PreparedQuery;

use crate::embed::cosine_similarity;
use crate::vocab;
use ramadvisor_core::SearchConfig;
use serde::Serialize;

/// Individual signal contributions for one chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Best cosine similarity between any query variant and the chunk
    /// embedding, floored at zero.
    pub vector: f32,
    pub keyword: f32,
    pub source_term: f32,
    /// Stand-in for keyword matching when no keyword matched.
    pub concept: f32,
    /// The whole translated query appears verbatim in the chunk.
    pub direct: f32,
    pub category: f32,
    pub profile: f32,
    pub context: f32,
    pub proximity: f32,
    /// Number of query keywords found in the chunk text.
    pub keyword_matches: usize,
}

impl ScoreBreakdown {
    #[must_use]
    pub fn total(&self) -> f32 {
        self.vector
            + self.keyword
            + self.source_term
            + self.concept
            + self.direct
            + self.category
            + self.profile
            + self.context
            + self.proximity
    }
}

/// Scores chunks against a prepared query using the configured boosts.
#[derive(Debug, Clone, Copy)]
pub struct ChunkScorer<'a> {
    config: &'a SearchConfig,
}

impl<'a> ChunkScorer<'a> {
    #[must_use]
    pub const fn new(config: &'a SearchConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn score(&self, query: &PreparedQuery, chunk: &IndexedChunk) -> ScoreBreakdown {
        let (keyword, keyword_matches) = self.keyword_signal(query, chunk);
        let concept = if keyword_matches == 0 {
            self.concept_signal(query, chunk)
        } else {
            0.0
        };

        ScoreBreakdown {
            vector: vector_signal(query, chunk),
            keyword,
            source_term: self.source_term_signal(query, chunk),
            concept,
            direct: self.direct_signal(query, chunk),
            category: category_signal(query, chunk),
            profile: profile_signal(query, chunk),
            context: self.context_signal(chunk),
            proximity: self.proximity_signal(query, chunk),
            keyword_matches,
        }
    }

    /// Keyword count times the keyword boost.
    #[must_use]
    pub fn keyword_signal(&self, query: &PreparedQuery, chunk: &IndexedChunk) -> (f32, usize) {
        let matches = query
            .keywords
            .iter()
            .filter(|keyword| chunk.contains(keyword))
            .count();
        (matches as f32 * self.config.keyword_boost, matches)
    }

    /// Source-language domain terms present in both query and chunk. Only
    /// chunks from an enriched export qualify.
    #[must_use]
    pub fn source_term_signal(&self, query: &PreparedQuery, chunk: &IndexedChunk) -> f32 {
        if !query.multilingual || !chunk.source_term_eligible {
            return 0.0;
        }
        let shared = vocab::SOURCE_DOMAIN_TERMS
            .iter()
            .filter(|term| query.lower.contains(*term) && chunk.contains(term))
            .count();
        shared as f32 * self.config.source_term_boost
    }

    /// One boost per source-language concept in the query whose English
    /// stand-ins appear in the chunk.
    #[must_use]
    pub fn concept_signal(&self, query: &PreparedQuery, chunk: &IndexedChunk) -> f32 {
        if !query.multilingual {
            return 0.0;
        }
        let hits = vocab::CONCEPT_MAPPINGS
            .iter()
            .filter(|(concept, stand_ins)| {
                query.lower.contains(concept) && stand_ins.iter().any(|term| chunk.contains(term))
            })
            .count();
        hits as f32 * self.config.concept_fallback_boost
    }

    #[must_use]
    pub fn direct_signal(&self, query: &PreparedQuery, chunk: &IndexedChunk) -> f32 {
        if !query.direct_needle.is_empty() && chunk.contains(&query.direct_needle) {
            self.config.translation_boost
        } else {
            0.0
        }
    }

    /// Context-term density plus weighted content richness.
    #[must_use]
    pub fn context_signal(&self, chunk: &IndexedChunk) -> f32 {
        let density = vocab::CONTEXT_TERMS
            .iter()
            .filter(|term| chunk.contains(term))
            .count();
        density as f32 * self.config.context_term_boost + chunk.richness * self.config.richness_weight
    }

    /// Query tokens that overlap, by substring in either direction, with any
    /// of the chunk's search terms.
    #[must_use]
    pub fn proximity_signal(&self, query: &PreparedQuery, chunk: &IndexedChunk) -> f32 {
        let overlapping = query
            .tokens
            .iter()
            .filter(|token| {
                chunk
                    .search_terms
                    .iter()
                    .any(|term| term.contains(token.as_str()) || token.contains(term.as_str()))
            })
            .count();
        overlapping as f32 * self.config.semantic_proximity_boost
    }
}

#[must_use]
pub fn vector_signal(query: &PreparedQuery, chunk: &IndexedChunk) -> f32 {
    let Some(stored) = chunk.embedding.as_deref() else {
        return 0.0;
    };
    query
        .embeddings
        .iter()
        .map(|variant| cosine_similarity(variant, stored))
        .fold(0.0_f32, f32::max)
}

/// Bonus for the chunk's own category when the query mentions that
/// category's vocabulary.
#[must_use]
pub fn category_signal(query: &PreparedQuery, chunk: &IndexedChunk) -> f32 {
    let Some(category) = chunk.chunk.topic_category.as_deref() else {
        return 0.0;
    };
    let haystack = query.category_haystack();
    vocab::CATEGORY_TERMS
        .iter()
        .find(|(name, _, _)| *name == category)
        .filter(|(_, _, terms)| terms.iter().any(|term| haystack.contains(term)))
        .map_or(0.0, |(_, bonus, _)| *bonus)
}

/// Bonus when the chunk text uses the investor profile's vocabulary. Awarded
/// at most once per chunk.
#[must_use]
pub fn profile_signal(query: &PreparedQuery, chunk: &IndexedChunk) -> f32 {
    let (bonus, terms) = vocab::profile_terms(query.profile);
    if terms.iter().any(|term| chunk.contains(term)) {
        bonus
    } else {
        0.0
    }
}
