//! Reconstruct the span tree from parent references.
//!
//! A span's parent is the span named by its first CHILD_OF reference.
//! Spans without one, or whose parent is not part of the trace, hang off
//! the synthetic root. Children keep the order in which spans appear in
//! the trace.

use super::node::{SpanTree, ROOT_INDEX};
use crate::parser::schema::Trace;
use crate::selectors::span::span_parent_id;
use log::{debug, warn};

/// Build the span tree for a trace
///
/// **Public** - main entry point for tree construction
///
/// Never fails. Anomalies degrade as follows:
/// * missing or unknown parent -> child of the synthetic root
/// * self reference or parent cycle -> child of the synthetic root
/// * duplicate span id -> one node, placed by the first occurrence's parent
/// * span id equal to [`TREE_ROOT_ID`](crate::utils::config::TREE_ROOT_ID)
///   -> dropped, the id is reserved for the synthetic root
pub fn build_span_tree(trace: &Trace) -> SpanTree {
    debug!("Building span tree from {} spans", trace.spans.len());

    let mut tree = SpanTree::with_root();

    // Register every node first so forward references resolve
    for span in &trace.spans {
        if tree.contains(&span.span_id) {
            warn!(
                "Span id {} already present in trace {}, skipping this occurrence",
                span.span_id, trace.trace_id
            );
            continue;
        }
        tree.insert(span.span_id.clone());
    }

    for span in &trace.spans {
        let Some(child) = tree.index_of(&span.span_id) else {
            continue;
        };

        // Already placed by an earlier span sharing this id, or a span
        // squatting on the reserved root id
        if child == ROOT_INDEX || tree.is_attached(child) {
            continue;
        }

        let parent = match span_parent_id(span).and_then(|id| tree.index_of(id)) {
            Some(parent) if tree.is_ancestor_or_self(child, parent) => {
                warn!(
                    "Span {} would close a parent cycle, attaching it to the root",
                    span.span_id
                );
                ROOT_INDEX
            }
            Some(parent) => parent,
            None => ROOT_INDEX,
        };

        tree.attach(child, parent);
    }

    tree.assign_depths();

    debug!(
        "Built span tree: {} spans, {} top-level, depth {}",
        tree.len(),
        tree.root().child_count(),
        tree.depth()
    );

    tree
}
