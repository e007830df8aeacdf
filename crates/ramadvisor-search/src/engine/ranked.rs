use crate::scoring::ScoreBreakdown;
use ramadvisor_core::Chunk;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Which step of the retrieval cascade produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalStage {
    /// Cleared the similarity threshold.
    Primary,
    /// Cleared only the low fallback threshold.
    LowThreshold,
    /// Picked because its category matches the query's.
    Category,
    /// Served from the default category as a last resort.
    Generic,
}

impl RetrievalStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::LowThreshold => "low_threshold",
            Self::Category => "category",
            Self::Generic => "generic",
        }
    }

    #[must_use]
    pub const fn is_fallback(self) -> bool {
        !matches!(self, Self::Primary)
    }
}

impl fmt::Display for RetrievalStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chunk selected by the engine, with its score.
///
/// `score` is the value the result was ranked by. For fallback stages that is
/// a fixed stage score rather than the computed total; `breakdown` always
/// holds the computed signals.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedChunk {
    /// Position of the chunk in the loaded collection.
    pub index: usize,
    pub score: f32,
    pub stage: RetrievalStage,
    pub breakdown: ScoreBreakdown,
    pub chunk: Arc<Chunk>,
}

impl RankedChunk {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.chunk.text
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.chunk.topic_category.as_deref()
    }

    /// Short human-readable explanation of why the chunk was selected.
    #[must_use]
    pub fn relevance_reason(&self) -> String {
        let mut reasons = Vec::new();

        if self.score > 0.7 {
            reasons.push("very strong match".to_string());
        } else if self.score > 0.5 {
            reasons.push("good match".to_string());
        } else if self.score > 0.3 {
            reasons.push("moderate match".to_string());
        }

        match self.breakdown.keyword_matches {
            0 => {}
            1 => reasons.push("1 matching keyword".to_string()),
            n => reasons.push(format!("{n} matching keywords")),
        }

        if self.breakdown.profile > 0.0 {
            reasons.push("fits risk profile".to_string());
        }

        if let Some(category) = self.category() {
            reasons.push(format!("category: {category}"));
        }

        if self.stage.is_fallback() {
            reasons.push(format!("{} fallback", self.stage));
        }

        if reasons.is_empty() {
            "general match".to_string()
        } else {
            reasons.join(", ")
        }
    }
}
