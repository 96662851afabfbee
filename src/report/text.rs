//! Terminal rendering of a trace summary.
//!
//! Color is applied through `colored`; callers switch it off globally with
//! `colored::control::set_override(false)`.

use super::summary::{SpanRow, TraceSummary};
use colored::*;

/// Render a human-readable summary for the terminal
///
/// At most `max_spans` outline rows are printed.
pub fn render_text_summary(summary: &TraceSummary, max_spans: usize) -> String {
    let mut out = String::new();

    out.push_str(&render_header(summary));
    out.push_str(&render_stats(summary));
    out.push_str(&render_ticks(summary));
    out.push_str(&render_outline(&summary.spans, max_spans));

    out
}

fn render_header(summary: &TraceSummary) -> String {
    let name = summary
        .trace_name
        .as_deref()
        .unwrap_or("<unknown root service>");

    let mut out = String::new();
    out.push('\n');
    out.push_str(&name.bold().to_string());
    out.push_str(&format!("\nTrace ID: {}\n", summary.trace_id));
    out.push_str("---------------------------------------------------\n");
    out
}

fn render_stats(summary: &TraceSummary) -> String {
    let mut out = String::new();

    if let Some(started_at) = &summary.started_at {
        out.push_str(&format!("Started:   {}\n", started_at));
    }
    out.push_str(&format!("Duration:  {}\n", summary.duration_label.cyan()));
    out.push_str(&format!("Spans:     {}\n", summary.span_count));
    out.push_str(&format!("Depth:     {}\n", summary.depth));
    out.push_str(&format!(
        "Services:  {} ({})\n",
        summary.services.len(),
        summary.services.join(", ")
    ));

    out
}

fn render_ticks(summary: &TraceSummary) -> String {
    if summary.tick_labels.is_empty() {
        return String::new();
    }

    format!("Timeline:  {}\n\n", summary.tick_labels.join(" | ").dimmed())
}

fn render_outline(rows: &[SpanRow], max_spans: usize) -> String {
    let mut out = String::new();

    for row in rows.iter().take(max_spans) {
        out.push_str(&render_row(row));
        out.push('\n');
    }

    if rows.len() > max_spans {
        out.push_str(&format!(
            "   (Showing {} of {} spans)\n",
            max_spans,
            rows.len()
        ));
    }

    out
}

/// One outline line, indented two spaces per level below the top
pub fn render_row(row: &SpanRow) -> String {
    let indent = "  ".repeat(row.depth.saturating_sub(1));
    let service = row.service_name.as_deref().unwrap_or("?");
    let collapsed_hint = if row.descendants > 0 {
        format!(" [+{}]", row.descendants)
    } else {
        String::new()
    };

    format!(
        "{}{} {}{} {}",
        indent,
        service.green(),
        row.operation_name,
        collapsed_hint.dimmed(),
        row.duration_label.yellow()
    )
}
