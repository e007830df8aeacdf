//! `rma stats`: knowledge base diagnostics.

use super::Context;
use crate::output::{pretty_kv, pretty_section, render_mode};
use ramadvisor_search::KnowledgeStats;
use std::io::Write;

/// Execute `rma stats`.
///
/// # Errors
///
/// Returns an error when the knowledge base cannot be loaded and sample
/// fallback is disabled, or when output fails.
pub fn run_stats(ctx: &Context) -> anyhow::Result<()> {
    let engine = ctx.engine();
    ctx.ready(&engine)?;
    let stats = engine.stats();
    render_mode(ctx.output, &stats, render_text, render_pretty)
}

fn render_text(stats: &KnowledgeStats, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "chunks\t{}", stats.total_chunks)?;
    writeln!(w, "with_embeddings\t{}", stats.with_embeddings)?;
    writeln!(w, "dropped\t{}", stats.dropped_chunks)?;
    writeln!(w, "categories\t{}", stats.categories.join(","))?;
    writeln!(w, "mode\t{}", stats.mode)?;
    writeln!(w, "enriched\t{}", stats.source_enriched)?;
    writeln!(w, "degraded\t{}", stats.degraded)
}

fn render_pretty(stats: &KnowledgeStats, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Knowledge base")?;
    pretty_kv(w, "Origin", stats.origin.as_deref().unwrap_or("-"))?;
    pretty_kv(w, "Chunks", stats.total_chunks.to_string())?;
    if let Some(pages) = stats.total_pages {
        pretty_kv(w, "Pages", pages.to_string())?;
    }
    pretty_kv(w, "Avg length", stats.avg_chunk_length.to_string())?;
    pretty_kv(w, "Embeddings", stats.with_embeddings.to_string())?;
    if stats.dropped_chunks > 0 {
        pretty_kv(w, "Dropped", stats.dropped_chunks.to_string())?;
    }
    pretty_kv(w, "Categories", stats.categories.join(", "))?;
    pretty_kv(w, "Mode", stats.mode)?;
    pretty_kv(w, "Dimension", stats.embedding_dim.to_string())?;
    if let Some(source_dim) = stats.source_embedding_dim {
        pretty_kv(w, "Stored dim", source_dim.to_string())?;
    }
    if let Some(source) = &stats.source_file {
        pretty_kv(w, "Source file", source)?;
    }
    if let Some(generated) = &stats.generated_at {
        pretty_kv(w, "Generated", generated)?;
    }
    pretty_kv(w, "Enriched", if stats.source_enriched { "yes" } else { "no" })?;
    if stats.degraded {
        pretty_kv(w, "Status", "degraded (built-in sample set)")?;
    }
    Ok(())
}
