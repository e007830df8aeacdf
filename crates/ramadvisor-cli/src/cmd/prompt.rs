//! `rma prompt`: the knowledge block injected into the advice prompt.

use super::Context;
use crate::output::render_mode;
use clap::Args;
use ramadvisor_core::RiskProfile;
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug)]
#[command(
    about = "Render the prompt knowledge block for a query",
    long_about = "Retrieve knowledge for a query and render it as the bounded text block that \
                  is inserted into the advice prompt.",
    after_help = "EXAMPLES:\n    # Block for a conservative investor\n    rma prompt \"préparer ma retraite\" --profile Prudent\n\n\
                  # Smaller block, fewer chunks\n    rma prompt risque --enhanced\n\n\
                  # Custom budget\n    rma prompt \"allocation d'actifs\" --max-length 800"
)]
pub struct PromptArgs {
    /// Free-text query, French or English.
    pub query: String,

    /// Investor risk profile.
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Maximum number of chunks. Defaults to the configured limit.
    #[arg(short = 'n', long, conflicts_with = "enhanced")]
    pub limit: Option<usize>,

    /// Character budget. Defaults to the configured maximum.
    #[arg(long, conflicts_with = "enhanced")]
    pub max_length: Option<usize>,

    /// Use the advice-prompt preset (fewer chunks, smaller budget).
    #[arg(long)]
    pub enhanced: bool,
}

#[derive(Debug, Serialize)]
pub struct PromptOutput {
    pub query: String,
    pub profile: RiskProfile,
    pub chunks: usize,
    pub length: usize,
    pub text: String,
}

/// Execute `rma prompt <query>`.
///
/// # Errors
///
/// Returns an error for a blank query, when the knowledge base cannot be
/// loaded and sample fallback is disabled, or when output fails.
pub fn run_prompt(args: &PromptArgs, ctx: &Context) -> anyhow::Result<()> {
    ctx.reject_empty_query(&args.query)?;

    let engine = ctx.engine();
    ctx.ready(&engine)?;

    let profile = RiskProfile::from_tag(args.profile.as_deref());
    let prompt = &ctx.config.prompt;
    let (limit, max_length) = if args.enhanced {
        (prompt.enhanced_results, prompt.enhanced_max_length)
    } else {
        (
            args.limit.unwrap_or(ctx.config.search.max_results),
            args.max_length.unwrap_or(prompt.max_length),
        )
    };

    let results = engine.search(&args.query, profile, limit);
    let text = engine.format_for_prompt(&results, Some(max_length));

    let output = PromptOutput {
        query: args.query.clone(),
        profile,
        chunks: results.len(),
        length: text.chars().count(),
        text,
    };

    render_mode(ctx.output, &output, render_block, render_block)
}

fn render_block(output: &PromptOutput, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "{}", output.text)
}
