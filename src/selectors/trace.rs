//! Trace-level derivations.
//!
//! Everything here is a pure function of the trace. Functions that need
//! the span tree build it on the spot; callers deriving many values from
//! one trace can build it once with [`build_span_tree`] and use the
//! `*_in_tree` variants.

use super::span::span_process;
use crate::parser::schema::{Process, Span, Trace};
use crate::tree::{build_span_tree, SpanTree};
use crate::utils::config::{SPAN_NOT_IN_TREE, TREE_ROOT_ID};
use log::{debug, warn};
use std::collections::{BTreeSet, HashMap, HashSet};

/// A span paired with the process that emitted it
///
/// `process` is `None` when the trace has no entry for the span's process id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydratedSpan<'a> {
    pub span: &'a Span,
    pub process: Option<&'a Process>,
}

impl<'a> HydratedSpan<'a> {
    pub fn service_name(&self) -> Option<&'a str> {
        self.process.map(|p| p.service_name.as_str())
    }
}

pub fn trace_id(trace: &Trace) -> &str {
    &trace.trace_id
}

pub fn trace_span_count(trace: &Trace) -> usize {
    trace.spans.len()
}

/// Map span id -> span; a repeated id keeps the last span seen
pub fn spans_by_id(trace: &Trace) -> HashMap<&str, &Span> {
    let mut map = HashMap::with_capacity(trace.spans.len());

    for span in &trace.spans {
        if map.insert(span.span_id.as_str(), span).is_some() {
            warn!(
                "Duplicate span id {} in trace {}, keeping the last occurrence",
                span.span_id, trace.trace_id
            );
        }
    }

    map
}

/// Pair one span with its process
pub fn span_with_process<'a>(trace: &'a Trace, span: &'a Span) -> HydratedSpan<'a> {
    let process = span_process(trace, span);
    if process.is_none() {
        debug!(
            "Span {} references unknown process {}",
            span.span_id, span.process_id
        );
    }

    HydratedSpan { span, process }
}

/// Pair every span with its process, in trace order
pub fn hydrate_spans_with_processes(trace: &Trace) -> Vec<HydratedSpan<'_>> {
    trace
        .spans
        .iter()
        .map(|span| span_with_process(trace, span))
        .collect()
}

/// Span of the tree root's first child
///
/// With several top-level spans, the first one in trace order wins. This is
/// the span that names the trace and bounds it in time by convention.
pub fn parent_span(trace: &Trace) -> Option<&Span> {
    parent_span_in_tree(trace, &build_span_tree(trace))
}

/// Alias of [`parent_span`]
pub fn root_span(trace: &Trace) -> Option<&Span> {
    parent_span(trace)
}

pub fn parent_span_in_tree<'a>(trace: &'a Trace, tree: &SpanTree) -> Option<&'a Span> {
    let first = tree.children(tree.root()).next()?;
    // Resolved through the id map, so a repeated id yields its last occurrence
    spans_by_id(trace).get(first.id()).copied()
}

/// `"{service}: {operation}"` of the root span
///
/// `None` for an empty trace or when the root span's process is unknown.
pub fn trace_name(trace: &Trace) -> Option<String> {
    let root = parent_span(trace)?;
    let service = span_with_process(trace, root).service_name()?;
    Some(format!("{}: {}", service, root.operation_name))
}

/// Duration of the root span, taken as the trace duration
pub fn trace_duration(trace: &Trace) -> Option<u64> {
    parent_span(trace).map(|span| span.duration)
}

/// Start time of the root span, taken as the trace start
pub fn trace_timestamp(trace: &Trace) -> Option<u64> {
    parent_span(trace).map(|span| span.start_time)
}

pub fn trace_end_timestamp(trace: &Trace) -> Option<u64> {
    parent_span(trace).map(|span| span.start_time.saturating_add(span.duration))
}

/// Number of span levels below the synthetic root
pub fn trace_depth(trace: &Trace) -> usize {
    build_span_tree(trace).depth() - 1
}

/// Depth of a span, top-level spans being 1
///
/// Walks parent links up to the synthetic root. `None` if the span is not
/// in the tree.
pub fn span_depth_for_trace(trace: &Trace, span: &Span) -> Option<usize> {
    span_depth_in_tree(&build_span_tree(trace), &span.span_id)
}

pub fn span_depth_in_tree(tree: &SpanTree, span_id: &str) -> Option<usize> {
    if span_id == TREE_ROOT_ID || !tree.contains(span_id) {
        return None;
    }

    let mut depth = 0;
    let mut current = span_id;
    while let Some(parent) = tree.parent_of(current) {
        depth += 1;
        current = parent;
    }

    Some(depth)
}

/// Distinct service names over all processes of the trace
pub fn trace_services(trace: &Trace) -> BTreeSet<&str> {
    trace
        .processes
        .values()
        .map(|p| p.service_name.as_str())
        .collect()
}

pub fn trace_service_count(trace: &Trace) -> usize {
    trace_services(trace).len()
}

/// Number of descendants of a span
///
/// Returns [`SPAN_NOT_IN_TREE`] (`-1`) when the span's id is not in the tree,
/// e.g. a stale reference held by a UI.
pub fn tree_size_for_span(trace: &Trace, span: &Span) -> isize {
    tree_size_in_tree(&build_span_tree(trace), &span.span_id)
}

pub fn tree_size_in_tree(tree: &SpanTree, span_id: &str) -> isize {
    if span_id == TREE_ROOT_ID {
        return SPAN_NOT_IN_TREE;
    }

    tree.size_of(span_id)
        .map(|size| size as isize - 1)
        .unwrap_or(SPAN_NOT_IN_TREE)
}

/// Drop every span that sits below one of the collapsed spans
///
/// Collapsed spans themselves are kept. Unknown ids are ignored.
pub fn omit_collapsed_spans<'a, S: AsRef<str>>(
    trace: &Trace,
    spans: &'a [Span],
    collapsed: &[S],
) -> Vec<&'a Span> {
    let tree = build_span_tree(trace);
    let mut hidden: HashSet<&str> = HashSet::new();

    for id in collapsed {
        match tree.descendants(id.as_ref()) {
            Some(descendants) => hidden.extend(descendants),
            None => debug!("Collapsed span {} is not in the tree", id.as_ref()),
        }
    }

    spans
        .iter()
        .filter(|span| !hidden.contains(span.span_id.as_str()))
        .collect()
}

/// Copy of the trace where repeated span ids get a `_n` suffix
///
/// The second occurrence of `abc` becomes `abc_1`, the third `abc_2`. A
/// suffix already used by another span is skipped.
pub fn enforce_unique_span_ids(trace: &Trace) -> Trace {
    let mut taken: HashSet<String> = trace.spans.iter().map(|s| s.span_id.clone()).collect();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut unique = trace.clone();

    for span in &mut unique.spans {
        let count = seen.entry(span.span_id.clone()).or_insert(0);
        if *count > 0 {
            let mut renamed = format!("{}_{}", span.span_id, count);
            while taken.contains(&renamed) {
                *count += 1;
                renamed = format!("{}_{}", span.span_id, count);
            }
            debug!("Renaming duplicate span id {} to {}", span.span_id, renamed);
            taken.insert(renamed.clone());
            span.span_id = renamed;
        }
        *count += 1;
    }

    unique
}
