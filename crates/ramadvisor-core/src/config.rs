//! Engine and prompt configuration.
//!
//! Every numeric default below is an empirically tuned constant carried over
//! from the production retrieval engine. Changing a default changes ranking
//! behaviour and needs the same review as any other behaviour change.
//!
//! Configuration is read from TOML:
//!
//! ```toml
//! [search]
//! mode = "multilingual"
//! similarity_threshold = 0.15
//!
//! [prompt]
//! max_length = 2000
//! ```

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no explicit path is given.
pub const PROJECT_CONFIG_FILE: &str = "ramadvisor.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
}

/// Which generation of the scoring pipeline to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Translate source-language queries, expand variants, and apply every
    /// cross-language signal.
    #[default]
    Multilingual,
    /// Single-language keyword scoring with the reduced concept table.
    Basic,
}

impl SearchMode {
    #[must_use]
    pub const fn is_multilingual(self) -> bool {
        matches!(self, Self::Multilingual)
    }
}

/// Thresholds, boost weights, and fallback sizes for the retrieval engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub mode: SearchMode,

    /// Primary cut: chunks must score strictly above this.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,

    /// Cut used by the first fallback stage.
    #[serde(default = "default_fallback_threshold")]
    pub fallback_threshold: f32,

    /// Per matched multilingual keyword.
    #[serde(default = "default_keyword_boost")]
    pub keyword_boost: f32,

    /// Bonus when the translated query appears verbatim in the chunk.
    #[serde(default = "default_translation_boost")]
    pub translation_boost: f32,

    /// Per source-language domain term present in both query and chunk.
    #[serde(default = "default_source_term_boost")]
    pub source_term_boost: f32,

    /// Per source-language concept whose target terms appear in a chunk that
    /// matched no keyword.
    #[serde(default = "default_concept_fallback_boost")]
    pub concept_fallback_boost: f32,

    /// Per generic financial-context term found in the chunk.
    #[serde(default = "default_context_term_boost")]
    pub context_term_boost: f32,

    /// Weight applied to the precomputed content-richness ratio.
    #[serde(default = "default_richness_weight")]
    pub richness_weight: f32,

    /// Per query token close to a chunk search term.
    #[serde(default = "default_semantic_proximity_boost")]
    pub semantic_proximity_boost: f32,

    /// Scale applied to each matched concept vector before normalization.
    #[serde(default = "default_concept_factor")]
    pub concept_factor: f32,

    /// Working dimension of query and chunk vectors.
    #[serde(default = "default_embedding_dim")]
    pub embedding_dim: usize,

    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[serde(default = "default_category_fallback_score")]
    pub category_fallback_score: f32,

    #[serde(default = "default_category_fallback_limit")]
    pub category_fallback_limit: usize,

    #[serde(default = "default_generic_fallback_score")]
    pub generic_fallback_score: f32,

    #[serde(default = "default_generic_fallback_limit")]
    pub generic_fallback_limit: usize,

    /// Category the terminal fallback stage draws from.
    #[serde(default = "default_generic_category")]
    pub generic_category: String,

    /// Serve the built-in sample chunks when the knowledge source fails.
    #[serde(default = "default_true")]
    pub sample_fallback: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::Multilingual,
            similarity_threshold: default_similarity_threshold(),
            fallback_threshold: default_fallback_threshold(),
            keyword_boost: default_keyword_boost(),
            translation_boost: default_translation_boost(),
            source_term_boost: default_source_term_boost(),
            concept_fallback_boost: default_concept_fallback_boost(),
            context_term_boost: default_context_term_boost(),
            richness_weight: default_richness_weight(),
            semantic_proximity_boost: default_semantic_proximity_boost(),
            concept_factor: default_concept_factor(),
            embedding_dim: default_embedding_dim(),
            max_results: default_max_results(),
            category_fallback_score: default_category_fallback_score(),
            category_fallback_limit: default_category_fallback_limit(),
            generic_fallback_score: default_generic_fallback_score(),
            generic_fallback_limit: default_generic_fallback_limit(),
            generic_category: default_generic_category(),
            sample_fallback: default_true(),
        }
    }
}

impl SearchConfig {
    /// Preset matching the first-generation single-language engine.
    #[must_use]
    pub fn basic() -> Self {
        Self::default().into_basic()
    }

    /// Switch to basic mode, applying the basic preset's threshold and boosts
    /// while keeping limits and fallback settings.
    #[must_use]
    pub fn into_basic(self) -> Self {
        Self {
            mode: SearchMode::Basic,
            similarity_threshold: 0.3,
            keyword_boost: 0.1,
            translation_boost: 0.15,
            concept_factor: 0.3,
            ..self
        }
    }
}

/// Rendering parameters for the knowledge block injected into prompts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    #[serde(default = "default_header")]
    pub header: String,
    /// Returned when there is nothing to render.
    #[serde(default = "default_empty_sentinel")]
    pub empty_sentinel: String,
    /// Returned by one-call retrieval when the engine cannot start.
    #[serde(default = "default_unavailable_sentinel")]
    pub unavailable_sentinel: String,
    /// Label used for chunks without a topic category.
    #[serde(default = "default_category_label")]
    pub default_category: String,
    /// Characters held back when the last chunk is truncated.
    #[serde(default = "default_truncation_margin")]
    pub truncation_margin: usize,
    /// Below this much remaining space a truncated chunk is not worth adding.
    #[serde(default = "default_min_remaining")]
    pub min_remaining: usize,
    #[serde(default = "default_enhanced_results")]
    pub enhanced_results: usize,
    #[serde(default = "default_enhanced_max_length")]
    pub enhanced_max_length: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
            header: default_header(),
            empty_sentinel: default_empty_sentinel(),
            unavailable_sentinel: default_unavailable_sentinel(),
            default_category: default_category_label(),
            truncation_margin: default_truncation_margin(),
            min_remaining: default_min_remaining(),
            enhanced_results: default_enhanced_results(),
            enhanced_max_length: default_enhanced_max_length(),
        }
    }
}

/// Load configuration from an explicit TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// [`AdvisorConfig`].
pub fn load_config(path: &Path) -> Result<AdvisorConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<AdvisorConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Per-user configuration path: `<config_dir>/ramadvisor/config.toml`.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ramadvisor").join("config.toml"))
}

/// Resolve the effective configuration.
///
/// Precedence: explicit path (must exist), then `ramadvisor.toml` in
/// `project_root`, then the per-user file, then built-in defaults.
///
/// # Errors
///
/// Returns an error if the explicit path is missing, or if any file that is
/// found fails to parse.
pub fn resolve_config(explicit: Option<&Path>, project_root: &Path) -> Result<AdvisorConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("config file {} does not exist", path.display());
        }
        return load_config(path);
    }

    let project = project_root.join(PROJECT_CONFIG_FILE);
    if project.exists() {
        return load_config(&project);
    }

    match user_config_path() {
        Some(user) if user.exists() => load_config(&user),
        _ => Ok(AdvisorConfig::default()),
    }
}

const fn default_true() -> bool {
    true
}

const fn default_similarity_threshold() -> f32 {
    0.15
}

const fn default_fallback_threshold() -> f32 {
    0.05
}

const fn default_keyword_boost() -> f32 {
    0.3
}

const fn default_translation_boost() -> f32 {
    0.25
}

const fn default_source_term_boost() -> f32 {
    0.35
}

const fn default_concept_fallback_boost() -> f32 {
    0.2
}

const fn default_context_term_boost() -> f32 {
    0.05
}

const fn default_richness_weight() -> f32 {
    0.1
}

const fn default_semantic_proximity_boost() -> f32 {
    0.05
}

const fn default_concept_factor() -> f32 {
    0.4
}

const fn default_embedding_dim() -> usize {
    50
}

const fn default_max_results() -> usize {
    5
}

const fn default_category_fallback_score() -> f32 {
    0.3
}

const fn default_category_fallback_limit() -> usize {
    3
}

const fn default_generic_fallback_score() -> f32 {
    0.2
}

const fn default_generic_fallback_limit() -> usize {
    2
}

fn default_generic_category() -> String {
    "Asset Allocation".to_string()
}

const fn default_max_length() -> usize {
    2000
}

fn default_header() -> String {
    "CONNAISSANCE CFA PERTINENTE:\n\n".to_string()
}

fn default_empty_sentinel() -> String {
    "Aucune connaissance CFA spécifique trouvée pour cette requête.".to_string()
}

fn default_unavailable_sentinel() -> String {
    "Connaissance CFA temporairement indisponible.".to_string()
}

fn default_category_label() -> String {
    "CFA".to_string()
}

const fn default_truncation_margin() -> usize {
    50
}

const fn default_min_remaining() -> usize {
    100
}

const fn default_enhanced_results() -> usize {
    3
}

const fn default_enhanced_max_length() -> usize {
    1800
}
