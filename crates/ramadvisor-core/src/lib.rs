#![forbid(unsafe_code)]
//! ramadvisor-core library.
//!
//! Shared data model, configuration and knowledge-base loaders used by the
//! retrieval engine in `ramadvisor-search`.
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` for return types; typed enums via `thiserror`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod knowledge;
pub mod model;

pub use config::{AdvisorConfig, PromptConfig, SearchConfig, SearchMode};
pub use knowledge::{
    JsonDirectorySource, KnowledgeBase, KnowledgeMetadata, KnowledgeSource, StaticSource,
    sample_chunks,
};
pub use model::{Chunk, RiskProfile};
