//! Summary command implementation.
//!
//! The summary command:
//! 1. Loads the trace file
//! 2. Resolves the view configuration
//! 3. Builds the trace summary
//! 4. Prints it and optionally writes it as JSON

use crate::commands::models::SummaryArgs;
use crate::output::{validate_path, write_summary};
use crate::parser::read_trace;
use crate::report::{render_text_summary, summarize_trace};
use crate::utils::config::{load_view_config, ViewConfig};
use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the summary command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Trace file missing or malformed
/// * Invalid view configuration
/// * File write errors
pub fn execute_summary(args: SummaryArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Loading trace from: {}", args.input.display());
    let trace = read_trace(&args.input).context("Failed to load trace")?;

    let config = resolve_config(&args)?;
    debug!("Using view config: {:?}", config);

    if !config.color {
        colored::control::set_override(false);
    }

    let summary = summarize_trace(&trace, &config).context("Failed to summarize trace")?;

    println!("{}", render_text_summary(&summary, config.max_spans));

    if let Some(output) = &args.output {
        write_summary(&summary, output).context("Failed to write summary JSON")?;
        info!("✓ Summary written to: {}", output.display());
    }

    info!(
        "Summary of {} spans completed in {:.2?}",
        summary.span_count,
        start_time.elapsed()
    );

    Ok(())
}

/// Config file (or defaults) with CLI overrides applied
pub fn resolve_config(args: &SummaryArgs) -> Result<ViewConfig> {
    let mut config = match &args.config {
        Some(path) => load_view_config(path)
            .with_context(|| format!("Failed to load view config {}", path.display()))?,
        None => ViewConfig::default(),
    };

    if let Some(interval) = args.tick_interval {
        config.tick_interval = interval;
    }
    if let Some(width) = args.tick_width {
        config.tick_width = width;
    }
    if let Some(max_spans) = args.max_spans {
        config.max_spans = max_spans;
    }
    if args.no_color {
        config.color = false;
    }

    config.validate().context("Invalid view configuration")?;

    Ok(config)
}

/// Validate summary arguments before running
///
/// **Public** - called by main.rs
pub fn validate_args(args: &SummaryArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        bail!("Input trace path cannot be empty");
    }

    if !args.input.is_file() {
        bail!("Input trace not found: {}", args.input.display());
    }

    if let Some(output) = &args.output {
        validate_path(output).context("Invalid output path")?;
    }

    Ok(())
}
