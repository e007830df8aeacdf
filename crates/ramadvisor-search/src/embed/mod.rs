//! Query embedding.
//!
//! The engine only needs something that turns text into a fixed-length
//! vector. [`EmbeddingModel`] is that seam; [`PseudoEmbedder`] is the built-in
//! implementation. It is a keyword heuristic, not a language model: it sums
//! hand-written concept vectors for each trigger term found in the text. A
//! real model can be plugged in through the trait without touching scoring.

mod concepts;

use anyhow::Result;
use ramadvisor_core::{SearchConfig, SearchMode};

pub use concepts::ConceptVector;

/// Text → vector model used for query variants.
pub trait EmbeddingModel: Send + Sync {
    /// Length of every vector returned by [`EmbeddingModel::embed`].
    fn dimension(&self) -> usize;

    /// Embed a single text.
    ///
    /// # Errors
    ///
    /// Returns an error when the model cannot produce a vector.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts.
    ///
    /// # Errors
    ///
    /// Returns the first embedding failure.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|text| self.embed(text)).collect()
    }
}

/// Which concept table a [`PseudoEmbedder`] draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConceptTable {
    /// French and English trigger terms.
    Multilingual,
    /// English trigger terms only.
    Basic,
}

impl ConceptTable {
    const fn entries(self) -> &'static [(&'static str, ConceptVector)] {
        match self {
            Self::Multilingual => concepts::MULTILINGUAL,
            Self::Basic => concepts::BASIC,
        }
    }
}

/// Deterministic heuristic embedder.
///
/// For each table entry whose trigger term occurs in the lowercased text, the
/// entry's concept vector scaled by `factor` is added to the leading
/// components. The sum is L2-normalized; text with no trigger term embeds to
/// the zero vector.
#[derive(Debug, Clone, PartialEq)]
pub struct PseudoEmbedder {
    dimension: usize,
    factor: f32,
    table: ConceptTable,
}

impl PseudoEmbedder {
    #[must_use]
    pub const fn new(dimension: usize, factor: f32, table: ConceptTable) -> Self {
        Self {
            dimension,
            factor,
            table,
        }
    }

    /// Embedder matching the configured search mode.
    #[must_use]
    pub const fn from_config(config: &SearchConfig) -> Self {
        let table = match config.mode {
            SearchMode::Multilingual => ConceptTable::Multilingual,
            SearchMode::Basic => ConceptTable::Basic,
        };
        Self::new(config.embedding_dim, config.concept_factor, table)
    }

    #[must_use]
    pub const fn table(&self) -> ConceptTable {
        self.table
    }

    /// Infallible form of [`EmbeddingModel::embed`].
    #[must_use]
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        let mut vector = vec![0.0_f32; self.dimension];

        for (term, concept) in self.table.entries() {
            if lower.contains(term) {
                for (slot, value) in vector.iter_mut().zip(concept.iter()) {
                    *slot += value * self.factor;
                }
            }
        }

        normalize(&mut vector);
        vector
    }
}

impl Default for PseudoEmbedder {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl EmbeddingModel for PseudoEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_text(text))
    }
}

/// Scale `vector` to unit length in place. Zero vectors are left unchanged.
pub fn normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}

/// Cosine similarity over the common prefix of two vectors.
///
/// Vectors of different length are compared on their first
/// `min(left.len(), right.len())` components. Empty or zero-norm inputs
/// yield `0.0`. The result is clamped to `[-1, 1]`.
#[must_use]
pub fn cosine_similarity(left: &[f32], right: &[f32]) -> f32 {
    let len = left.len().min(right.len());
    if len == 0 {
        return 0.0;
    }

    let (left, right) = (&left[..len], &right[..len]);
    let mut dot = 0.0_f32;
    let mut left_norm = 0.0_f32;
    let mut right_norm = 0.0_f32;
    for (l, r) in left.iter().zip(right) {
        dot += l * r;
        left_norm += l * l;
        right_norm += r * r;
    }

    if left_norm <= 0.0 || right_norm <= 0.0 {
        return 0.0;
    }

    (dot / (left_norm.sqrt() * right_norm.sqrt())).clamp(-1.0, 1.0)
}

/// Truncate or zero-pad `vector` to exactly `dimension` components.
#[must_use]
pub fn fit_dimension(mut vector: Vec<f32>, dimension: usize) -> Vec<f32> {
    vector.resize(dimension, 0.0);
    vector
}
