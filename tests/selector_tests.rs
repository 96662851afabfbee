mod common;

use common::{generate_trace, seeds, simple_trace, GenOptions};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use trace_lens::parser::{Span, Trace};
use trace_lens::selectors::{
    enforce_unique_span_ids, filter_spans_for_text, filter_spans_for_timestamps,
    number_sort_comparator, omit_collapsed_spans, parent_span, sorted_spans, span_parent_id,
    span_timestamp, string_sort_comparator, trace_depth, trace_duration, trace_end_timestamp,
    trace_name, trace_services, trace_timestamp, tree_size_for_span, SortDirection, SpanSort,
};
use trace_lens::tree::build_span_tree;
use trace_lens::utils::config::SPAN_NOT_IN_TREE;

#[test]
fn test_parent_span_is_first_unparented_span() {
    for seed in seeds() {
        let trace = generate_trace(seed, GenOptions::default());
        let ids: HashSet<&str> = trace.spans.iter().map(|s| s.span_id.as_str()).collect();

        let expected = trace
            .spans
            .iter()
            .find(|span| span_parent_id(span).map_or(true, |p| !ids.contains(p)));

        assert_eq!(parent_span(&trace), expected, "seed {}", seed);
    }
}

#[test]
fn test_trace_depth_is_tree_depth_minus_one() {
    for seed in seeds() {
        let trace = generate_trace(seed, GenOptions::default());
        let tree = build_span_tree(&trace);

        assert_eq!(trace_depth(&trace), tree.depth() - 1, "seed {}", seed);
    }
}

#[test]
fn test_root_subtree_covers_every_other_span() {
    let single_root = GenOptions {
        extra_roots: 0,
        dangling: 0,
        ..GenOptions::default()
    };

    for seed in seeds() {
        let trace = generate_trace(seed, single_root);
        let root = parent_span(&trace).expect("non-empty trace");

        assert_eq!(
            tree_size_for_span(&trace, root),
            trace.spans.len() as isize - 1,
            "seed {}",
            seed
        );
    }

    let trace = simple_trace();
    let stranger = Span::new("not-there", "p1", "ghost", 0, 1);
    assert_eq!(tree_size_for_span(&trace, &stranger), SPAN_NOT_IN_TREE);
}

#[test]
fn test_collapse_removes_exactly_the_subtree() {
    for seed in seeds().take(20) {
        let trace = generate_trace(seed, GenOptions::default());

        for span in &trace.spans {
            let kept = omit_collapsed_spans(&trace, &trace.spans, &[span.span_id.as_str()]);
            let removed = trace.spans.len() - kept.len();

            assert_eq!(removed as isize, tree_size_for_span(&trace, span));
            assert!(kept.iter().any(|s| s.span_id == span.span_id));
        }
    }
}

#[test]
fn test_collapse_nested_ids_removes_once() {
    let trace = simple_trace();

    let kept = omit_collapsed_spans(&trace, &trace.spans, &["root", "a", "unknown"]);

    let ids: Vec<&str> = kept.iter().map(|s| s.span_id.as_str()).collect();
    assert_eq!(ids, vec!["root"]);
}

#[test]
fn test_sorted_spans_by_start_time() {
    for seed in seeds().take(10) {
        let trace = generate_trace(seed, GenOptions::default());
        let before = trace.spans.clone();

        let ascending = sorted_spans(
            &trace.spans,
            &SpanSort::new(SortDirection::Ascending, number_sort_comparator, span_timestamp),
        );
        let descending = sorted_spans(
            &trace.spans,
            &SpanSort::new(
                SortDirection::try_from(-1).expect("valid direction"),
                number_sort_comparator,
                span_timestamp,
            ),
        );

        let asc_times: Vec<u64> = ascending.iter().map(|s| s.start_time).collect();
        let mut expected = asc_times.clone();
        expected.sort_unstable();
        assert_eq!(asc_times, expected);

        let desc_times: Vec<u64> = descending.iter().map(|s| s.start_time).collect();
        expected.reverse();
        assert_eq!(desc_times, expected);

        assert_eq!(trace.spans, before);
    }
}

#[test]
fn test_sorted_spans_by_operation_is_stable() {
    let mut trace = Trace::new("t");
    trace.spans = vec![
        Span::new("1", "p", "beta", 0, 1),
        Span::new("2", "p", "Alpha", 0, 1),
        Span::new("3", "p", "beta", 0, 1),
    ];

    let sort = SpanSort::new(SortDirection::Ascending, string_sort_comparator, |s: &Span| {
        s.operation_name.clone()
    });
    let ids: Vec<&str> = sorted_spans(&trace.spans, &sort)
        .into_iter()
        .map(|s| s.span_id.as_str())
        .collect();

    assert_eq!(ids, vec!["2", "1", "3"]);
}

#[test]
fn test_unique_ids_are_distinct_and_ordered() {
    let mut trace = Trace::new("dups");
    trace.spans = vec![
        Span::new("a", "p", "x", 0, 1),
        Span::new("a", "p", "y", 1, 1),
        Span::new("a_1", "p", "z", 2, 1),
        Span::new("a", "p", "w", 3, 1),
        Span::new("b", "p", "v", 4, 1),
    ];

    let unique = enforce_unique_span_ids(&trace);

    let ids: Vec<&str> = unique.spans.iter().map(|s| s.span_id.as_str()).collect();
    let distinct: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(distinct.len(), ids.len());

    let ops: Vec<&str> = unique.spans.iter().map(|s| s.operation_name.as_str()).collect();
    assert_eq!(ops, vec!["x", "y", "z", "w", "v"]);
    assert_eq!(ids[0], "a");
    assert_eq!(ids[2], "a_1");
}

#[test]
fn test_trace_level_values() {
    let trace = simple_trace();

    assert_eq!(trace_name(&trace), Some("api: GET /".to_string()));
    assert_eq!(trace_timestamp(&trace), Some(1_000_000));
    assert_eq!(trace_duration(&trace), Some(600_000));
    assert_eq!(trace_end_timestamp(&trace), Some(1_600_000));
    assert_eq!(trace_depth(&trace), 3);
    assert_eq!(trace_services(&trace).into_iter().collect::<Vec<_>>(), vec!["api"]);
}

#[test]
fn test_span_filters() {
    let trace = simple_trace();

    let window = filter_spans_for_timestamps(&trace.spans, 1_100_000, 1_200_000);
    let ids: Vec<&str> = window.iter().map(|s| s.span_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);

    let matched = filter_spans_for_text(&trace, &trace.spans, "api rndr");
    let ids: Vec<&str> = matched.iter().map(|s| s.span_id.as_str()).collect();
    assert_eq!(ids, vec!["c"]);
}
