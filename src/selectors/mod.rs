//! Derivations over spans and traces.
//!
//! This module provides:
//! - Field accessors and filters for single spans
//! - Trace-level aggregates (root span, name, depth, services, subtree sizes)
//! - Sorting and collapse filtering of span lists

pub mod sort;
pub mod span;
pub mod trace;

// Re-export main functions
pub use sort::{
    number_sort_comparator, sorted_spans, string_sort_comparator, SortDirection, SpanSort,
};
pub use span::{
    filter_spans_for_text, filter_spans_for_timestamps, span_duration, span_id, span_name,
    span_parent_id, span_process, span_process_id, span_reference_by_type, span_references,
    span_service_name, span_timestamp,
};
pub use trace::{
    enforce_unique_span_ids, hydrate_spans_with_processes, omit_collapsed_spans, parent_span,
    parent_span_in_tree, root_span, span_depth_for_trace, span_depth_in_tree, span_with_process,
    spans_by_id, trace_depth, trace_duration, trace_end_timestamp, trace_id, trace_name,
    trace_service_count, trace_services, trace_span_count, trace_timestamp, tree_size_for_span,
    tree_size_in_tree, HydratedSpan,
};
