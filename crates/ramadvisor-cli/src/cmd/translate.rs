//! `rma translate`: show how a query is translated and expanded.

use super::Context;
use crate::output::{pretty_kv, pretty_section, render_mode};
use clap::Args;
use ramadvisor_search::TermTranslator;
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug)]
#[command(
    about = "Translate a query and list its keywords",
    long_about = "Run the French → English query translation used by search and print the \
                  translated query with the combined keyword list. Needs no knowledge data.",
    after_help = "EXAMPLES:\n    rma translate \"gestion de patrimoine\"\n    rma translate \"tolérance au risque\" --format json"
)]
pub struct TranslateArgs {
    /// Query to translate.
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct TranslateOutput {
    pub query: String,
    pub translated: String,
    pub keywords: Vec<String>,
}

/// Execute `rma translate <query>`.
///
/// # Errors
///
/// Returns an error for a blank query or when output fails.
pub fn run_translate(args: &TranslateArgs, ctx: &Context) -> anyhow::Result<()> {
    ctx.reject_empty_query(&args.query)?;

    let translation = TermTranslator::new().translate(&args.query);
    let output = TranslateOutput {
        query: args.query.clone(),
        translated: translation.translated,
        keywords: translation.keywords,
    };

    render_mode(
        ctx.output,
        &output,
        |o, w| {
            writeln!(w, "{}", o.translated)?;
            writeln!(w, "{}", o.keywords.join(" "))
        },
        |o, w| {
            pretty_section(w, "Translation")?;
            pretty_kv(w, "Query", &o.query)?;
            pretty_kv(w, "Translated", &o.translated)?;
            pretty_kv(w, "Keywords", o.keywords.join(", "))
        },
    )
}
