use crate::output::read_summary;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::Path;

/// Validate a summary JSON file by reading it back
pub fn validate_summary_file(file_path: &Path) -> Result<()> {
    println!("Validating summary: {}", file_path.display());

    let summary = read_summary(file_path)
        .with_context(|| format!("Invalid summary file {}", file_path.display()))?;

    println!("✓ Valid summary JSON");
    println!("  Version: {}", summary.version);
    println!("  Trace: {}", summary.trace_id);
    println!("  Spans: {}", summary.span_count);
    println!("  Duration: {}", summary.duration_label);
    println!("  Services: {}", summary.services.len());

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("trace-lens v{}", env!("CARGO_PKG_VERSION"));
    println!("Summary Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Span tree and timeline views for Jaeger traces.");
}
