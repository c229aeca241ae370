//! VRT CLI - DOM visual regression diffs
//!
//! Compares two DOM snapshots of a page, stores the deduplicated list of
//! text and style changes, and optionally asks a language model how to fix
//! each one.

use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod enrich;
mod output;
mod store;

use config::VrtConfig;
use output::OutputFormat;
use store::ReportStore;

/// Detect content and style regressions between two renderings of a page.
#[derive(Parser)]
#[command(name = "vrt")]
#[command(author, version)]
#[command(about = "Detect content and style regressions between two DOM snapshots")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  vrt diff base.json test.json --label home    Compare snapshots, write home_diff.json
  vrt enrich home                              Add fix suggestions, write home_diff_with_ai.json
  vrt show home --enriched                     Render a stored report")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log only errors (reports are still printed)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a base and a test DOM snapshot
    #[command(visible_alias = "d")]
    Diff {
        /// Base (reference) snapshot JSON
        base: PathBuf,

        /// Test snapshot JSON
        test: PathBuf,

        /// Label for this run (default: vrt_<timestamp>)
        #[arg(short, long)]
        label: Option<String>,

        /// Directory for reports (overrides config)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Print the report without writing it
        #[arg(long)]
        no_save: bool,
    },

    /// Attach model fix suggestions to a stored diff
    Enrich {
        /// Label of a previous diff run
        label: String,

        /// Directory for reports (overrides config)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Model name (overrides MODEL_NAME and config)
        #[arg(short, long)]
        model: Option<String>,

        /// Ollama base URL (overrides OLLAMA_BASE_URL and config)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Render a stored report
    Show {
        /// Label of a previous run
        label: String,

        /// Show the enriched report instead of the raw diff
        #[arg(short, long)]
        enriched: bool,

        /// Directory for reports (overrides config)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration from .vrtrc.toml
    let config = VrtConfig::load(Path::new("."));

    // Resolve output format: CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(OutputFormat::from_name)
            .unwrap_or(OutputFormat::Table)
    });

    if let Some(use_color) = config.use_color() {
        colored::control::set_override(use_color);
    }

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        println!();
        return Ok(());
    };

    match command {
        Commands::Diff {
            base,
            test,
            label,
            out_dir,
            no_save,
        } => {
            let store = (!no_save).then(|| ReportStore::new(config.output_dir(out_dir.as_deref())));
            commands::diff::run(&base, &test, label.as_deref(), store.as_ref(), format).await
        }
        Commands::Enrich {
            label,
            out_dir,
            model,
            base_url,
        } => {
            let store = ReportStore::new(config.output_dir(out_dir.as_deref()));
            let settings = config
                .enrich_settings()
                .with_model(model)
                .with_base_url(base_url);
            commands::enrich::run(&label, &store, settings, format).await
        }
        Commands::Show {
            label,
            enriched,
            out_dir,
        } => {
            let store = ReportStore::new(config.output_dir(out_dir.as_deref()));
            commands::show::run(&label, enriched, &store, format).await
        }
    }
}
