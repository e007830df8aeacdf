#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use ramadvisor_core::config::resolve_config;
use ramadvisor_core::error::ErrorCode;
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "rma: multilingual knowledge retrieval for financial advice prompts",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding the knowledge export.
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Configuration file. Defaults to ./ramadvisor.toml, then the user config.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the single-language basic scoring pipeline.
    #[arg(long, global = true)]
    basic: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    Search(cmd::search::SearchArgs),

    Prompt(cmd::prompt::PromptArgs),

    Translate(cmd::translate::TranslateArgs),

    #[command(
        about = "Show knowledge base statistics",
        long_about = "Load the knowledge base and report chunk counts, categories, embedding \
                      dimensions, and whether the built-in sample set is being served.",
        after_help = "EXAMPLES:\n    rma stats\n    rma --data-dir ./export stats --format json"
    )]
    Stats,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("RMA_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "ramadvisor=debug,rma=debug,info"
        } else {
            "ramadvisor=info,warn"
        })
    });

    let format = env::var("RMA_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    let project_root = env::current_dir()?;

    let mut config = match resolve_config(cli.config.as_deref(), &project_root) {
        Ok(config) => config,
        Err(err) => {
            render_error(
                output,
                &CliError::from_code(ErrorCode::ConfigParseError, format!("{err:#}")),
            )?;
            return Err(err);
        }
    };
    if cli.basic {
        config.search = config.search.into_basic();
    }
    debug!(mode = ?config.search.mode, data_dir = %cli.data_dir.display(), "resolved settings");

    let ctx = cmd::Context {
        config,
        data_dir: cli.data_dir,
        output,
    };

    let result = match cli.command {
        Commands::Search(ref args) => cmd::search::run_search(args, &ctx),
        Commands::Prompt(ref args) => cmd::prompt::run_prompt(args, &ctx),
        Commands::Translate(ref args) => cmd::translate::run_translate(args, &ctx),
        Commands::Stats => cmd::stats::run_stats(&ctx),
    };

    if let Err(err) = &result
        && !cmd::is_reported(err)
    {
        render_error(output, &unexpected(err))?;
    }
    result
}

fn unexpected(err: &anyhow::Error) -> CliError {
    CliError::from_code(ErrorCode::InternalUnexpected, format!("{err:#}"))
}
