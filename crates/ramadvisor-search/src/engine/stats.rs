use serde::Serialize;

/// Lifecycle state of a [`super::RetrievalEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    Uninitialized,
    Ready,
}

/// Snapshot of the loaded knowledge base, for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnowledgeStats {
    pub state: EngineState,
    pub mode: &'static str,
    pub total_chunks: usize,
    /// Highest page number cited by any chunk.
    pub total_pages: Option<u32>,
    /// Mean chunk text length in characters, rounded.
    pub avg_chunk_length: usize,
    pub with_embeddings: usize,
    /// Chunks rejected at load time for having no text.
    pub dropped_chunks: usize,
    /// Distinct categories, sorted.
    pub categories: Vec<String>,
    pub embedding_dim: usize,
    /// Dimension recorded in the export metadata, if any.
    pub source_embedding_dim: Option<usize>,
    pub source_file: Option<String>,
    pub generated_at: Option<String>,
    pub source_enriched: bool,
    /// Serving the built-in sample set because the real data failed to load.
    pub degraded: bool,
    pub origin: Option<String>,
    pub cached_queries: usize,
}
