//! trace-lens CLI
//!
//! Summarizes Jaeger traces as span trees with timeline ticks
//! and formatted durations.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use trace_lens::commands::{
    display_version, execute_spans, execute_summary, spans, summary, validate_summary_file,
    SortKey, SpansArgs, SummaryArgs,
};

/// trace-lens - span trees and timelines for Jaeger traces
#[derive(Parser, Debug)]
#[command(name = "trace-lens")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a trace summary
    Summary {
        /// Jaeger trace JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the JSON summary (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// View configuration file (TOML)
        #[arg(short, long, env = "TRACE_LENS_CONFIG")]
        config: Option<PathBuf>,

        /// Number of tick intervals on the timeline
        #[arg(long)]
        ticks: Option<usize>,

        /// Tick width
        #[arg(long)]
        width: Option<f64>,

        /// Maximum span rows to print
        #[arg(long)]
        max_spans: Option<usize>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// List the spans of a trace
    Spans {
        /// Jaeger trace JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Sort key
        #[arg(short, long, value_enum, default_value_t = SortKey::Tree)]
        sort: SortKey,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Hide the descendants of this span id (repeatable)
        #[arg(long)]
        collapse: Vec<String>,

        /// Fuzzy filter on service and operation name
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Validate a summary JSON file
    Validate {
        /// Path to summary JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Summary {
            input,
            output,
            config,
            ticks,
            width,
            max_spans,
            no_color,
        } => {
            let args = SummaryArgs {
                input,
                output,
                config,
                tick_interval: ticks,
                tick_width: width,
                max_spans,
                no_color,
            };

            summary::validate_args(&args)?;
            execute_summary(args)?;
        }

        Commands::Spans {
            input,
            sort,
            desc,
            collapse,
            filter,
        } => {
            let args = SpansArgs {
                input,
                sort,
                descending: desc,
                collapse,
                filter,
            };

            spans::validate_args(&args)?;
            execute_spans(args)?;
        }

        Commands::Validate { file } => {
            validate_summary_file(&file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
