//! Spans command implementation.
//!
//! Lists the spans of a trace after text filtering, collapsing and sorting.

use crate::commands::models::{SortKey, SpansArgs};
use crate::parser::schema::{Span, Trace};
use crate::parser::read_trace;
use crate::selectors::{
    filter_spans_for_text, number_sort_comparator, omit_collapsed_spans, sorted_spans,
    span_depth_in_tree, span_duration, span_service_name, span_timestamp, string_sort_comparator,
    SortDirection, SpanSort,
};
use crate::timeline::format_duration_for_trace;
use crate::tree::{build_span_tree, SpanTree};
use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::collections::HashMap;

/// Execute the spans command
pub fn execute_spans(args: SpansArgs) -> Result<()> {
    info!("Loading trace from: {}", args.input.display());
    let trace = read_trace(&args.input).context("Failed to load trace")?;

    for line in list_spans(&trace, &args) {
        println!("{}", line);
    }

    Ok(())
}

/// Render the span listing as lines of text
///
/// Order of operations: text filter, then collapse, then sort.
pub fn list_spans(trace: &Trace, args: &SpansArgs) -> Vec<String> {
    let tree = build_span_tree(trace);

    let visible: Vec<Span> = match &args.filter {
        Some(text) => filter_spans_for_text(trace, &trace.spans, text)
            .into_iter()
            .cloned()
            .collect(),
        None => trace.spans.clone(),
    };

    let visible: Vec<Span> = omit_collapsed_spans(trace, &visible, &args.collapse)
        .into_iter()
        .cloned()
        .collect();

    debug!(
        "{} of {} spans visible after filtering",
        visible.len(),
        trace.spans.len()
    );

    let dir = if args.descending {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };

    let ordered = order_spans(trace, &tree, &visible, args.sort, dir);

    ordered
        .into_iter()
        .map(|span| format_span_line(trace, &tree, span))
        .collect()
}

fn order_spans<'a>(
    trace: &Trace,
    tree: &SpanTree,
    spans: &'a [Span],
    key: SortKey,
    dir: SortDirection,
) -> Vec<&'a Span> {
    match key {
        SortKey::Tree => {
            let mut position: HashMap<&str, usize> = HashMap::new();
            tree.walk(|node| {
                let next = position.len();
                position.insert(node.id(), next);
            });
            let sort = SpanSort::new(dir, number_sort_comparator, |span: &Span| {
                position.get(span.span_id.as_str()).copied().unwrap_or(usize::MAX)
            });
            sorted_spans(spans, &sort)
        }
        SortKey::Start => {
            sorted_spans(spans, &SpanSort::new(dir, number_sort_comparator, span_timestamp))
        }
        SortKey::Duration => {
            sorted_spans(spans, &SpanSort::new(dir, number_sort_comparator, span_duration))
        }
        SortKey::Operation => {
            let sort = SpanSort::new(dir, string_sort_comparator, |span: &Span| {
                span.operation_name.clone()
            });
            sorted_spans(spans, &sort)
        }
        SortKey::Service => {
            let sort = SpanSort::new(dir, string_sort_comparator, |span: &Span| {
                span_service_name(trace, span).unwrap_or_default().to_string()
            });
            sorted_spans(spans, &sort)
        }
    }
}

fn format_span_line(trace: &Trace, tree: &SpanTree, span: &Span) -> String {
    let depth = span_depth_in_tree(tree, &span.span_id).unwrap_or(1);
    format!(
        "{}{} {} {} ({})",
        "  ".repeat(depth.saturating_sub(1)),
        span_service_name(trace, span).unwrap_or("?"),
        span.operation_name,
        format_duration_for_trace(trace, span.duration),
        span.span_id
    )
}

/// Validate spans arguments before running
pub fn validate_args(args: &SpansArgs) -> Result<()> {
    if !args.input.is_file() {
        bail!("Input trace not found: {}", args.input.display());
    }

    if args.collapse.iter().any(|id| id.is_empty()) {
        bail!("Collapsed span ids cannot be empty");
    }

    Ok(())
}
