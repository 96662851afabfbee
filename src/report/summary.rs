//! Serializable overview of a trace.
//!
//! Gathers the derivations a viewer shows above and beside the timeline:
//! name, counts, depth, services, tick marks and an indented span outline.

use crate::parser::schema::Trace;
use crate::selectors::{
    parent_span_in_tree, span_depth_in_tree, span_with_process, spans_by_id, trace_name,
    trace_services, tree_size_in_tree,
};
use crate::timeline::{format_duration_for_unit, ticks_for_trace, DurationUnit, Tick};
use crate::tree::build_span_tree;
use crate::utils::config::{ViewConfig, SCHEMA_VERSION};
use crate::utils::error::TraceError;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

/// Top-level summary structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSummary {
    /// Schema version for compatibility checking
    pub version: String,

    pub trace_id: String,

    /// `"{service}: {operation}"` of the root span, if resolvable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_name: Option<String>,

    pub span_count: usize,

    /// Span levels below the synthetic root
    pub depth: usize,

    /// Distinct service names, sorted
    pub services: Vec<String>,

    /// Root span start, microseconds since epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<u64>,

    /// Root span start as RFC 3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,

    /// Root span duration, microseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,

    pub duration_label: String,

    pub ticks: Vec<Tick>,

    /// Tick offsets from the trace start, in the trace's display unit
    pub tick_labels: Vec<String>,

    /// Spans in tree pre-order
    pub spans: Vec<SpanRow>,

    /// Timestamp when the summary was generated
    pub generated_at: String,
}

/// One line of the span outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanRow {
    pub span_id: String,
    pub operation_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,

    /// 1 for top-level spans
    pub depth: usize,

    /// Number of spans below this one
    pub descendants: usize,

    /// Microseconds since the trace start
    pub start_offset: u64,

    pub duration: u64,
    pub duration_label: String,
}

/// Build the summary of a trace
///
/// # Errors
/// * `TraceError::InvalidArgument` - Tick settings in `config` are invalid
pub fn summarize_trace(trace: &Trace, config: &ViewConfig) -> Result<TraceSummary, TraceError> {
    debug!("Summarizing trace {}", trace.trace_id);

    let tree = build_span_tree(trace);
    let root = parent_span_in_tree(trace, &tree);

    let start_time = root.map(|span| span.start_time);
    let duration = root.map(|span| span.duration);
    let unit = DurationUnit::for_trace_duration(duration.unwrap_or(0));

    let trace_start = start_time.unwrap_or(0);
    let ticks = ticks_for_trace(trace, config.tick_interval, config.tick_width)?;
    let tick_labels = ticks
        .iter()
        .map(|tick| format_duration_for_unit(tick.timestamp.saturating_sub(trace_start), unit))
        .collect();

    let by_id = spans_by_id(trace);
    let mut spans = Vec::with_capacity(tree.len());

    tree.walk(|node| {
        if node.is_root() {
            return;
        }
        let Some(span) = by_id.get(node.id()) else {
            return;
        };

        spans.push(SpanRow {
            span_id: span.span_id.clone(),
            operation_name: span.operation_name.clone(),
            service_name: span_with_process(trace, span).service_name().map(str::to_string),
            depth: span_depth_in_tree(&tree, node.id()).unwrap_or(node.depth()),
            descendants: tree_size_in_tree(&tree, node.id()).max(0) as usize,
            start_offset: span.start_time.saturating_sub(trace_start),
            duration: span.duration,
            duration_label: format_duration_for_unit(span.duration, unit),
        });
    });

    Ok(TraceSummary {
        version: SCHEMA_VERSION.to_string(),
        trace_id: trace.trace_id.clone(),
        trace_name: trace_name(trace),
        span_count: trace.spans.len(),
        depth: tree.depth() - 1,
        services: trace_services(trace).into_iter().map(String::from).collect(),
        start_time,
        started_at: start_time.and_then(format_timestamp),
        duration,
        duration_label: format_duration_for_unit(duration.unwrap_or(0), unit),
        ticks,
        tick_labels,
        spans,
        generated_at: Utc::now().to_rfc3339(),
    })
}

/// Render microseconds since epoch as RFC 3339
fn format_timestamp(micros: u64) -> Option<String> {
    let micros = i64::try_from(micros).ok()?;
    DateTime::<Utc>::from_timestamp_micros(micros).map(|dt| dt.to_rfc3339())
}
