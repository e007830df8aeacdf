#![forbid(unsafe_code)]
//! ramadvisor-search library.
//!
//! Multilingual retrieval over the advisory knowledge base: French queries
//! are translated and expanded, every chunk is scored on a set of keyword,
//! vocabulary and pseudo-vector signals, and the best chunks are rendered as
//! a prompt block.
//!
//! ```no_run
//! use ramadvisor_core::{AdvisorConfig, JsonDirectorySource};
//! use ramadvisor_search::RetrievalEngine;
//!
//! let engine = RetrievalEngine::new(JsonDirectorySource::new("data"), AdvisorConfig::default());
//! let results = engine.find_relevant_knowledge("préparer ma retraite", Some("Prudent"), None);
//! println!("{}", engine.format_for_prompt(&results, None));
//! ```
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` for return types.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod embed;
pub mod engine;
pub mod prompt;
pub mod scoring;
pub mod translate;
mod vocab;

pub use embed::{ConceptTable, EmbeddingModel, PseudoEmbedder, cosine_similarity};
pub use engine::{EngineState, KnowledgeStats, RankedChunk, RetrievalEngine, RetrievalStage};
pub use prompt::{PromptFormatter, format_knowledge_for_prompt, generate_preview};
pub use scoring::{ChunkScorer, ScoreBreakdown};
pub use translate::{TermTranslator, Translation, extract_keywords};
