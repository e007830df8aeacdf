//! Retrieval orchestration.
//!
//! [`RetrievalEngine`] owns the loaded knowledge base, the translator, the
//! embedding model and a per-(query, profile) result cache. The hosting
//! process builds one engine, shares it by reference, and calls
//! [`RetrievalEngine::dispose`] (or simply drops it) when done.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──initialize()──▶ Ready
//!       │                           ▲
//!       └── load fails ── sample fallback enabled ──┘ (degraded)
//! ```
//!
//! Queries never fail. Before `Ready` they trigger initialization; if that
//! fails they return nothing.

mod fallback;
mod ranked;
mod stats;

pub use ranked::{RankedChunk, RetrievalStage};
pub use stats::{EngineState, KnowledgeStats};

use crate::embed::{EmbeddingModel, PseudoEmbedder};
use crate::prompt::PromptFormatter;
use crate::scoring::{ChunkScorer, IndexedChunk, PreparedQuery, ScoreBreakdown};
use crate::translate::TermTranslator;
use anyhow::{Result, bail};
use ramadvisor_core::{
    AdvisorConfig, Chunk, KnowledgeBase, KnowledgeMetadata, KnowledgeSource, PromptConfig,
    RiskProfile, SearchConfig, sample_chunks,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::{debug, info, instrument, warn};

type CacheKey = (String, RiskProfile);
type ResultCache = HashMap<CacheKey, Arc<[RankedChunk]>>;

const SAMPLE_ORIGIN: &str = "built-in sample";

/// Read-only state built once by [`RetrievalEngine::initialize`].
#[derive(Debug)]
struct KnowledgeIndex {
    chunks: Vec<IndexedChunk>,
    metadata: KnowledgeMetadata,
    origin: String,
    source_enriched: bool,
    degraded: bool,
    dropped: usize,
}

/// Multilingual retrieval over a chunk collection.
pub struct RetrievalEngine {
    config: SearchConfig,
    prompt: PromptConfig,
    translator: TermTranslator,
    embedder: Box<dyn EmbeddingModel>,
    source: Box<dyn KnowledgeSource>,
    index: OnceLock<KnowledgeIndex>,
    init_guard: Mutex<()>,
    cache: Mutex<ResultCache>,
}

impl RetrievalEngine {
    /// Engine over `source` with the built-in [`PseudoEmbedder`].
    #[must_use]
    pub fn new(source: impl KnowledgeSource + 'static, config: AdvisorConfig) -> Self {
        let embedder = PseudoEmbedder::from_config(&config.search);
        Self {
            config: config.search,
            prompt: config.prompt,
            translator: TermTranslator::new(),
            embedder: Box::new(embedder),
            source: Box::new(source),
            index: OnceLock::new(),
            init_guard: Mutex::new(()),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the embedding model. Takes effect for chunks indexed and
    /// queries embedded afterwards, so call it before initialization.
    #[must_use]
    pub fn with_embedder(mut self, embedder: impl EmbeddingModel + 'static) -> Self {
        self.embedder = Box::new(embedder);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[must_use]
    pub const fn prompt_config(&self) -> &PromptConfig {
        &self.prompt
    }

    #[must_use]
    pub const fn translator(&self) -> &TermTranslator {
        &self.translator
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        if self.index.get().is_some() {
            EngineState::Ready
        } else {
            EngineState::Uninitialized
        }
    }

    /// True when serving the built-in sample set.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.index.get().is_some_and(|index| index.degraded)
    }

    /// Load the knowledge base. Idempotent: a `Ready` engine returns
    /// immediately without reloading.
    ///
    /// # Errors
    ///
    /// Returns the load error when the source fails and sample fallback is
    /// disabled. The engine stays `Uninitialized` in that case.
    #[instrument(skip(self))]
    pub fn initialize(&self) -> Result<()> {
        if self.index.get().is_some() {
            return Ok(());
        }
        let _guard = self.init_guard.lock().unwrap_or_else(PoisonError::into_inner);
        if self.index.get().is_some() {
            return Ok(());
        }

        let loaded = self.source.load().and_then(|base| {
            if !base.chunks.iter().any(Chunk::is_usable) {
                bail!("knowledge source {} has no chunk with text", base.origin);
            }
            Ok(base)
        });

        let index = match loaded {
            Ok(base) => self.build_index(base, false),
            Err(err) if self.config.sample_fallback => {
                warn!("knowledge base unavailable, serving built-in sample set: {err:#}");
                self.build_index(KnowledgeBase::new(sample_chunks(), SAMPLE_ORIGIN), true)
            }
            Err(err) => return Err(err.context("failed to initialize retrieval engine")),
        };

        info!(
            chunks = index.chunks.len(),
            dropped = index.dropped,
            degraded = index.degraded,
            enriched = index.source_enriched,
            "retrieval engine ready ({})",
            index.origin
        );
        if self.index.set(index).is_err() {
            debug!("knowledge index was already set");
        }
        Ok(())
    }

    fn build_index(&self, base: KnowledgeBase, degraded: bool) -> KnowledgeIndex {
        let dimension = self.embedder.dimension();
        let total = base.chunks.len();
        let mut chunks = Vec::with_capacity(total);

        for (position, mut chunk) in base.chunks.into_iter().enumerate() {
            if !chunk.is_usable() {
                warn!(position, "dropping chunk without text");
                continue;
            }
            if degraded && chunk.embedding.is_none() {
                chunk.embedding = self.derive_embedding(&chunk);
            }
            chunks.push(IndexedChunk::new(chunk, base.source_enriched, dimension));
        }

        if let Some(source_dim) = base.metadata.embedding_dim
            && source_dim < dimension
        {
            warn!(
                source_dim,
                dimension, "stored embeddings are shorter than the working dimension"
            );
        }

        KnowledgeIndex {
            dropped: total - chunks.len(),
            chunks,
            metadata: base.metadata,
            origin: base.origin,
            source_enriched: base.source_enriched,
            degraded,
        }
    }

    /// Embedding for a chunk that shipped without one, from its keywords
    /// (or its text when it has none).
    fn derive_embedding(&self, chunk: &Chunk) -> Option<Vec<f32>> {
        let basis = if chunk.keywords.is_empty() {
            chunk.text.clone()
        } else {
            chunk.keywords.join(" ")
        };
        match self.embedder.embed(&basis) {
            Ok(vector) => Some(vector),
            Err(err) => {
                warn!("could not derive sample chunk embedding: {err:#}");
                None
            }
        }
    }

    fn ready_index(&self) -> Option<&KnowledgeIndex> {
        if let Some(index) = self.index.get() {
            return Some(index);
        }
        if let Err(err) = self.initialize() {
            warn!("retrieval unavailable: {err:#}");
            return None;
        }
        self.index.get()
    }

    /// Ranked chunks for `query`.
    ///
    /// `profile` is a free-form tag; unknown or absent tags mean balanced.
    /// `max_results` defaults to the configured limit. Never fails: an
    /// engine that cannot initialize returns an empty list.
    #[must_use]
    #[instrument(skip(self))]
    pub fn find_relevant_knowledge(
        &self,
        query: &str,
        profile: Option<&str>,
        max_results: Option<usize>,
    ) -> Vec<RankedChunk> {
        self.search(
            query,
            RiskProfile::from_tag(profile),
            max_results.unwrap_or(self.config.max_results),
        )
    }

    /// Typed form of [`RetrievalEngine::find_relevant_knowledge`].
    #[must_use]
    #[instrument(skip(self))]
    pub fn search(&self, query: &str, profile: RiskProfile, max_results: usize) -> Vec<RankedChunk> {
        if max_results == 0 || query.trim().is_empty() {
            return Vec::new();
        }
        let Some(index) = self.ready_index() else {
            return Vec::new();
        };

        let key = (query.to_string(), profile);
        if let Some(hit) = self.lock_cache().get(&key) {
            debug!("cache hit");
            return truncated(hit, max_results);
        }

        let ranked: Arc<[RankedChunk]> = self.rank(index, query, profile).into();
        let results = truncated(&ranked, max_results);
        self.lock_cache().insert(key, ranked);
        results
    }

    fn rank(&self, index: &KnowledgeIndex, query: &str, profile: RiskProfile) -> Vec<RankedChunk> {
        let prepared = PreparedQuery::new(
            query,
            profile,
            &self.config,
            &self.translator,
            self.embedder.as_ref(),
        );
        debug!(
            translated = %prepared.translated,
            keywords = prepared.keywords.len(),
            variants = prepared.variants.len(),
            "prepared query"
        );

        let scorer = ChunkScorer::new(&self.config);
        let scored: Vec<ScoreBreakdown> = index
            .chunks
            .iter()
            .map(|chunk| scorer.score(&prepared, chunk))
            .collect();

        let ranked = fallback::rank(&index.chunks, &scored, &prepared.lower, &self.config);
        debug!(
            results = ranked.len(),
            stage = ranked.first().map_or("none", |r| r.stage.as_str()),
            "ranked knowledge"
        );
        ranked
    }

    /// Render `results` as a prompt block, capped at `max_length`
    /// characters (default from the prompt config).
    #[must_use]
    pub fn format_for_prompt(&self, results: &[RankedChunk], max_length: Option<usize>) -> String {
        PromptFormatter::from_config(&self.prompt)
            .format(results, max_length.unwrap_or(self.prompt.max_length))
    }

    /// Retrieve and format in one call, with the smaller result count and
    /// length budget used for the advice prompt. Returns the
    /// "unavailable" sentinel when the engine cannot initialize.
    #[must_use]
    #[instrument(skip(self))]
    pub fn enhanced_knowledge(&self, query: &str, profile: Option<&str>) -> String {
        if self.ready_index().is_none() {
            return self.prompt.unavailable_sentinel.clone();
        }
        let results = self.find_relevant_knowledge(query, profile, Some(self.prompt.enhanced_results));
        PromptFormatter::from_config(&self.prompt).format(&results, self.prompt.enhanced_max_length)
    }

    #[must_use]
    pub fn stats(&self) -> KnowledgeStats {
        let cached_queries = self.cached_queries();
        let mode = if self.config.mode.is_multilingual() {
            "multilingual"
        } else {
            "basic"
        };

        let Some(index) = self.index.get() else {
            return KnowledgeStats {
                state: EngineState::Uninitialized,
                mode,
                total_chunks: 0,
                total_pages: None,
                avg_chunk_length: 0,
                with_embeddings: 0,
                dropped_chunks: 0,
                categories: Vec::new(),
                embedding_dim: self.embedder.dimension(),
                source_embedding_dim: None,
                source_file: None,
                generated_at: None,
                source_enriched: false,
                degraded: false,
                origin: None,
                cached_queries,
            };
        };

        let categories: BTreeSet<String> = index
            .chunks
            .iter()
            .filter_map(|chunk| chunk.chunk.topic_category.clone())
            .collect();

        KnowledgeStats {
            state: EngineState::Ready,
            mode,
            total_chunks: index.chunks.len(),
            total_pages: index
                .chunks
                .iter()
                .filter_map(|chunk| chunk.chunk.page_number)
                .max(),
            avg_chunk_length: average_length(&index.chunks),
            with_embeddings: index
                .chunks
                .iter()
                .filter(|chunk| chunk.embedding.is_some())
                .count(),
            dropped_chunks: index.dropped,
            categories: categories.into_iter().collect(),
            embedding_dim: self.embedder.dimension(),
            source_embedding_dim: index.metadata.embedding_dim,
            source_file: index.metadata.source_file.clone(),
            generated_at: index.metadata.generated_at.clone(),
            source_enriched: index.source_enriched,
            degraded: index.degraded,
            origin: Some(index.origin.clone()),
            cached_queries,
        }
    }

    #[must_use]
    pub fn cached_queries(&self) -> usize {
        self.lock_cache().len()
    }

    pub fn clear_cache(&self) {
        let mut cache = self.lock_cache();
        let cleared = cache.len();
        cache.clear();
        debug!(cleared, "result cache cleared");
    }

    /// Release the engine. Equivalent to dropping it, with a log line.
    pub fn dispose(self) {
        info!(cached = self.cached_queries(), "retrieval engine disposed");
    }

    fn lock_cache(&self) -> MutexGuard<'_, ResultCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn average_length(chunks: &[IndexedChunk]) -> usize {
    if chunks.is_empty() {
        return 0;
    }
    let total: usize = chunks.iter().map(|chunk| chunk.chunk.text.chars().count()).sum();
    (total + chunks.len() / 2) / chunks.len()
}

fn truncated(ranked: &[RankedChunk], max_results: usize) -> Vec<RankedChunk> {
    ranked.iter().take(max_results).cloned().collect()
}
