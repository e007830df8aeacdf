//! `rma search`: ranked knowledge chunks for a query.

use super::Context;
use crate::output::{pretty_kv, pretty_section, render_mode};
use clap::Args;
use ramadvisor_core::RiskProfile;
use ramadvisor_search::{RankedChunk, ScoreBreakdown, extract_keywords, generate_preview};
use serde::Serialize;
use std::io::Write;

const PREVIEW_CHARS: usize = 160;

#[derive(Args, Debug)]
#[command(
    about = "Search the knowledge base",
    long_about = "Rank knowledge chunks against a query. French queries are translated and \
                  expanded before scoring; when nothing clears the similarity threshold the \
                  fallback cascade still returns the closest generic passages.",
    after_help = "EXAMPLES:\n    # Search with a risk profile\n    rma search \"préparer ma retraite\" --profile Prudent\n\n\
                  # Show per-signal scores\n    rma search \"allocation d'actifs\" --explain\n\n\
                  # Machine-readable output\n    rma search risque --format json"
)]
pub struct SearchArgs {
    /// Free-text query, French or English.
    pub query: String,

    /// Investor risk profile (Prudent, Équilibré, Audacieux or English names).
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Maximum number of results. Defaults to the configured limit.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Include the per-signal score breakdown.
    #[arg(long)]
    pub explain: bool,
}

#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub rank: usize,
    pub index: usize,
    pub score: f32,
    pub stage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    pub reason: String,
    pub preview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub profile: RiskProfile,
    pub translated: String,
    pub degraded: bool,
    pub count: usize,
    pub results: Vec<SearchHit>,
}

/// Execute `rma search <query>`.
///
/// # Errors
///
/// Returns an error for a blank query, when the knowledge base cannot be
/// loaded and sample fallback is disabled, or when output fails.
pub fn run_search(args: &SearchArgs, ctx: &Context) -> anyhow::Result<()> {
    ctx.reject_empty_query(&args.query)?;

    let engine = ctx.engine();
    ctx.ready(&engine)?;

    let profile = RiskProfile::from_tag(args.profile.as_deref());
    let limit = args.limit.unwrap_or(ctx.config.search.max_results);
    let results = engine.search(&args.query, profile, limit);

    let translated = if ctx.config.search.mode.is_multilingual() {
        engine.translator().translate_query(&args.query)
    } else {
        args.query.trim().to_lowercase()
    };
    let mut preview_terms = extract_keywords(&args.query);
    preview_terms.extend(extract_keywords(&translated));
    let preview_terms: Vec<&str> = preview_terms.iter().map(String::as_str).collect();

    let hits = results
        .iter()
        .enumerate()
        .map(|(rank, result)| hit(rank + 1, result, &preview_terms, args.explain))
        .collect::<Vec<_>>();

    let output = SearchOutput {
        query: args.query.clone(),
        profile,
        translated,
        degraded: engine.is_degraded(),
        count: hits.len(),
        results: hits,
    };

    render_mode(ctx.output, &output, render_text, render_pretty)
}

fn hit(rank: usize, result: &RankedChunk, terms: &[&str], explain: bool) -> SearchHit {
    SearchHit {
        rank,
        index: result.index,
        score: result.score,
        stage: result.stage.to_string(),
        category: result.category().map(str::to_string),
        page: result.chunk.page_number,
        reason: result.relevance_reason(),
        preview: generate_preview(result.text(), terms, PREVIEW_CHARS),
        breakdown: explain.then_some(result.breakdown),
    }
}

fn render_text(output: &SearchOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for hit in &output.results {
        writeln!(
            w,
            "{}\t{:.3}\t{}\t{}\t{}",
            hit.rank,
            hit.score,
            hit.stage,
            hit.category.as_deref().unwrap_or("-"),
            hit.preview.replace(['\n', '\t'], " ")
        )?;
    }
    Ok(())
}

fn render_pretty(output: &SearchOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Results for \"{}\"", output.query))?;
    pretty_kv(w, "Profile", output.profile.source_label())?;
    pretty_kv(w, "Translated", &output.translated)?;
    if output.degraded {
        pretty_kv(w, "Knowledge", "built-in sample set (data unavailable)")?;
    }
    writeln!(w)?;

    if output.results.is_empty() {
        writeln!(w, "No results.")?;
        return Ok(());
    }

    for hit in &output.results {
        let page = hit.page.map(|p| format!(" p.{p}")).unwrap_or_default();
        writeln!(
            w,
            "{:>2}. [{}]{page}  score {:.3}  ({})",
            hit.rank,
            hit.category.as_deref().unwrap_or("uncategorised"),
            hit.score,
            hit.reason
        )?;
        writeln!(w, "    {}", hit.preview)?;
        if let Some(b) = &hit.breakdown {
            writeln!(
                w,
                "    vector {:.3}  keyword {:.3}  source {:.3}  concept {:.3}  direct {:.3}",
                b.vector, b.keyword, b.source_term, b.concept, b.direct
            )?;
            writeln!(
                w,
                "    category {:.3}  profile {:.3}  context {:.3}  proximity {:.3}",
                b.category, b.profile, b.context, b.proximity
            )?;
        }
    }
    Ok(())
}
