//! Knowledge-base loading.
//!
//! The retrieval engine never touches the filesystem itself. It asks a
//! [`KnowledgeSource`] for a fully parsed [`KnowledgeBase`] once, at
//! initialization, and keeps the result read-only afterwards.

mod sample;

pub use sample::sample_chunks;

use crate::error::KnowledgeError;
use crate::model::Chunk;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Chunks enriched with appended source-language terms. Preferred when present.
pub const ENRICHED_CHUNKS_FILE: &str = "cfa_knowledge_embeddings_french_enriched.json";
/// Plain chunk export.
pub const CHUNKS_FILE: &str = "cfa_knowledge_embeddings.json";
/// Export metadata written alongside the chunks.
pub const METADATA_FILE: &str = "cfa_embedding_config.json";

/// Export metadata. Every field is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeMetadata {
    #[serde(default)]
    pub embedding_dim: Option<usize>,
    #[serde(default)]
    pub source_file: Option<String>,
    #[serde(default)]
    pub generated_at: Option<String>,
}

/// A parsed chunk collection plus where it came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeBase {
    pub chunks: Vec<Chunk>,
    pub metadata: KnowledgeMetadata,
    /// True when the chunks came from the source-language enriched export.
    pub source_enriched: bool,
    /// Human-readable origin, used in logs and stats.
    pub origin: String,
}

impl KnowledgeBase {
    #[must_use]
    pub fn new(chunks: Vec<Chunk>, origin: impl Into<String>) -> Self {
        Self {
            chunks,
            metadata: KnowledgeMetadata::default(),
            source_enriched: false,
            origin: origin.into(),
        }
    }
}

/// Upstream collaborator that supplies the chunk collection.
pub trait KnowledgeSource: Send + Sync {
    /// Load and parse the whole collection.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing data is missing or malformed.
    fn load(&self) -> Result<KnowledgeBase>;
}

/// Serves an already-parsed collection.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    chunks: Vec<Chunk>,
}

impl StaticSource {
    #[must_use]
    pub const fn new(chunks: Vec<Chunk>) -> Self {
        Self { chunks }
    }
}

impl KnowledgeSource for StaticSource {
    fn load(&self) -> Result<KnowledgeBase> {
        Ok(KnowledgeBase::new(self.chunks.clone(), "in-memory"))
    }
}

/// Reads the JSON export directory produced by the embedding scripts.
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    dir: PathBuf,
}

impl JsonDirectorySource {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn load_chunks(&self) -> Result<(Vec<Chunk>, PathBuf, bool), KnowledgeError> {
        let enriched = self.dir.join(ENRICHED_CHUNKS_FILE);
        if enriched.exists() {
            match read_chunks(&enriched) {
                Ok(chunks) => return Ok((chunks, enriched, true)),
                Err(err) => warn!("enriched chunks unusable, trying plain export: {err}"),
            }
        }

        let plain = self.dir.join(CHUNKS_FILE);
        if !plain.exists() {
            return Err(KnowledgeError::FileNotFound {
                dir: self.dir.clone(),
                tried: format!("{ENRICHED_CHUNKS_FILE}, {CHUNKS_FILE}"),
            });
        }
        read_chunks(&plain).map(|chunks| (chunks, plain, false))
    }

    fn load_metadata(&self) -> KnowledgeMetadata {
        let path = self.dir.join(METADATA_FILE);
        if !path.exists() {
            debug!("no metadata file at {}", path.display());
            return KnowledgeMetadata::default();
        }

        match fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|raw| {
                serde_json::from_str::<KnowledgeMetadata>(&raw).map_err(anyhow::Error::from)
            })
        {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!("ignoring unreadable metadata {}: {err}", path.display());
                KnowledgeMetadata::default()
            }
        }
    }
}

impl KnowledgeSource for JsonDirectorySource {
    fn load(&self) -> Result<KnowledgeBase> {
        if !self.dir.is_dir() {
            return Err(KnowledgeError::DirectoryNotFound(self.dir.clone()).into());
        }

        let (chunks, path, source_enriched) = self.load_chunks()?;
        let metadata = self.load_metadata();

        info!(
            chunks = chunks.len(),
            enriched = source_enriched,
            "loaded knowledge from {}",
            path.display()
        );

        Ok(KnowledgeBase {
            chunks,
            metadata,
            source_enriched,
            origin: path.display().to_string(),
        })
    }
}

/// Parse a chunk export. Records that do not decode as a [`Chunk`] are
/// logged and replaced by an empty chunk, which the engine drops with the
/// other textless ones.
fn read_chunks(path: &Path) -> Result<Vec<Chunk>, KnowledgeError> {
    let raw = fs::read_to_string(path).map_err(|source| KnowledgeError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let records: Vec<serde_json::Value> =
        serde_json::from_str(&raw).map_err(|source| KnowledgeError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if records.is_empty() {
        return Err(KnowledgeError::Empty(path.to_path_buf()));
    }

    let chunks = records
        .into_iter()
        .enumerate()
        .map(|(position, record)| {
            serde_json::from_value::<Chunk>(record).unwrap_or_else(|err| {
                warn!(position, "malformed chunk record in {}: {err}", path.display());
                Chunk::default()
            })
        })
        .collect();
    Ok(chunks)
}
