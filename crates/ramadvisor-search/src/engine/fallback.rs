//! Threshold filtering and the fallback cascade.
//!
//! Stages run in order and the first nonempty one wins:
//!
//! 1. chunks above the similarity threshold;
//! 2. chunks above the low fallback threshold;
//! 3. chunks from the categories the query points at, best category first;
//! 4. chunks from the generic category, or the first chunks of the
//!    collection when that category is empty.
//!
//! Stage 4 only comes back empty when the collection itself is empty.

use super::ranked::{RankedChunk, RetrievalStage};
use crate::scoring::{IndexedChunk, ScoreBreakdown};
use crate::vocab;
use ramadvisor_core::SearchConfig;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, warn};

/// Rank scored chunks. `scored[i]` is the breakdown for `chunks[i]`.
pub(crate) fn rank(
    chunks: &[IndexedChunk],
    scored: &[ScoreBreakdown],
    query_lower: &str,
    config: &SearchConfig,
) -> Vec<RankedChunk> {
    let primary = above_threshold(chunks, scored, config.similarity_threshold, RetrievalStage::Primary);
    if !primary.is_empty() {
        return primary;
    }
    warn!(
        threshold = config.similarity_threshold,
        "no chunk cleared the similarity threshold, falling back"
    );

    let low = above_threshold(chunks, scored, config.fallback_threshold, RetrievalStage::LowThreshold);
    if !low.is_empty() {
        debug!(results = low.len(), "served by low-threshold fallback");
        return low;
    }

    let by_category = category_fallback(chunks, scored, query_lower, config);
    if !by_category.is_empty() {
        debug!(results = by_category.len(), "served by category fallback");
        return by_category;
    }

    let generic = generic_fallback(chunks, scored, config);
    debug!(results = generic.len(), "served by generic fallback");
    generic
}

fn above_threshold(
    chunks: &[IndexedChunk],
    scored: &[ScoreBreakdown],
    threshold: f32,
    stage: RetrievalStage,
) -> Vec<RankedChunk> {
    let mut results: Vec<RankedChunk> = chunks
        .iter()
        .zip(scored)
        .enumerate()
        .filter(|(_, (_, breakdown))| breakdown.total() > threshold)
        .map(|(index, (chunk, breakdown))| RankedChunk {
            index,
            score: breakdown.total(),
            stage,
            breakdown: *breakdown,
            chunk: Arc::clone(&chunk.chunk),
        })
        .collect();

    // Stable: equal scores keep collection order.
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    results
}

fn category_fallback(
    chunks: &[IndexedChunk],
    scored: &[ScoreBreakdown],
    query_lower: &str,
    config: &SearchConfig,
) -> Vec<RankedChunk> {
    let categories = vocab::fallback_categories(query_lower);

    let mut candidates: Vec<(usize, &IndexedChunk)> = chunks
        .iter()
        .enumerate()
        .filter(|(_, chunk)| {
            chunk
                .chunk
                .topic_category
                .as_deref()
                .is_some_and(|category| categories.contains(&category))
        })
        .collect();

    candidates.sort_by(|(_, a), (_, b)| {
        b.category_weight
            .partial_cmp(&a.category_weight)
            .unwrap_or(Ordering::Equal)
    });

    candidates
        .into_iter()
        .take(config.category_fallback_limit)
        .map(|(index, chunk)| {
            fixed_score(index, chunk, scored, config.category_fallback_score, RetrievalStage::Category)
        })
        .collect()
}

fn generic_fallback(
    chunks: &[IndexedChunk],
    scored: &[ScoreBreakdown],
    config: &SearchConfig,
) -> Vec<RankedChunk> {
    let limit = config.generic_fallback_limit.max(1);
    let in_generic: Vec<(usize, &IndexedChunk)> = chunks
        .iter()
        .enumerate()
        .filter(|(_, chunk)| chunk.chunk.in_category(&config.generic_category))
        .take(limit)
        .collect();

    let selected = if in_generic.is_empty() {
        chunks.iter().enumerate().take(limit).collect()
    } else {
        in_generic
    };

    selected
        .into_iter()
        .map(|(index, chunk)| {
            fixed_score(index, chunk, scored, config.generic_fallback_score, RetrievalStage::Generic)
        })
        .collect()
}

fn fixed_score(
    index: usize,
    chunk: &IndexedChunk,
    scored: &[ScoreBreakdown],
    score: f32,
    stage: RetrievalStage,
) -> RankedChunk {
    RankedChunk {
        index,
        score,
        stage,
        breakdown: scored.get(index).copied().unwrap_or_default(),
        chunk: Arc::clone(&chunk.chunk),
    }
}
