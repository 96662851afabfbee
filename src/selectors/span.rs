//! Field accessors and simple filters over individual spans.

use crate::parser::schema::{Process, RefType, Span, SpanReference, Trace};

pub fn span_id(span: &Span) -> &str {
    &span.span_id
}

pub fn span_name(span: &Span) -> &str {
    &span.operation_name
}

pub fn span_duration(span: &Span) -> u64 {
    span.duration
}

pub fn span_timestamp(span: &Span) -> u64 {
    span.start_time
}

pub fn span_process_id(span: &Span) -> &str {
    &span.process_id
}

pub fn span_references(span: &Span) -> &[SpanReference] {
    &span.references
}

/// First reference of the given kind, in declaration order
pub fn span_reference_by_type(span: &Span, ref_type: RefType) -> Option<&SpanReference> {
    span.references.iter().find(|r| r.ref_type == ref_type)
}

/// Span id named by the first CHILD_OF reference
///
/// FOLLOWS_FROM references are skipped. `None` when there is no CHILD_OF
/// reference at all. Whether the id exists in the trace is not checked here.
pub fn span_parent_id(span: &Span) -> Option<&str> {
    span_reference_by_type(span, RefType::ChildOf).map(|r| r.span_id.as_str())
}

/// Process that emitted the span, if the trace knows it
pub fn span_process<'a>(trace: &'a Trace, span: &Span) -> Option<&'a Process> {
    trace.processes.get(&span.process_id)
}

pub fn span_service_name<'a>(trace: &'a Trace, span: &Span) -> Option<&'a str> {
    span_process(trace, span).map(|p| p.service_name.as_str())
}

/// Spans whose start time falls inside `[left_bound, right_bound]`
pub fn filter_spans_for_timestamps(spans: &[Span], left_bound: u64, right_bound: u64) -> Vec<&Span> {
    spans
        .iter()
        .filter(|span| span.start_time >= left_bound && span.start_time <= right_bound)
        .collect()
}

/// Spans whose `"{service} {operation}"` fuzzily matches `text`
///
/// Matching is case-insensitive and succeeds when every character of `text`
/// appears in order. An empty query keeps every span.
pub fn filter_spans_for_text<'a>(trace: &Trace, spans: &'a [Span], text: &str) -> Vec<&'a Span> {
    let needle = text.to_lowercase();

    spans
        .iter()
        .filter(|span| {
            let haystack = format!(
                "{} {}",
                span_service_name(trace, span).unwrap_or_default(),
                span.operation_name
            );
            fuzzy_match(&needle, &haystack.to_lowercase())
        })
        .collect()
}

/// Subsequence match: all chars of `needle` occur in `haystack` in order
fn fuzzy_match(needle: &str, haystack: &str) -> bool {
    let mut remaining = haystack.chars();
    needle
        .chars()
        .all(|wanted| remaining.by_ref().any(|c| c == wanted))
}
