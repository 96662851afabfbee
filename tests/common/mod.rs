//! Shared fixtures for integration tests.
#![allow(dead_code)]

use trace_lens::parser::{Process, Span, Trace};

/// Small linear congruential generator so generated traces are reproducible
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(6364136223846793005).wrapping_add(1))
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    /// Uniform in `0..bound`
    pub fn below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound.max(1)
    }

    /// True with probability `percent / 100`
    pub fn chance(&mut self, percent: u64) -> bool {
        self.below(100) < percent
    }
}

/// Knobs for [`generate_trace`]
#[derive(Debug, Clone, Copy)]
pub struct GenOptions {
    pub span_count: usize,
    /// Percent of spans (after the first) with no CHILD_OF parent
    pub extra_roots: u64,
    /// Percent of spans carrying an extra FOLLOWS_FROM reference
    pub follows_from: u64,
    /// Percent of spans whose parent id does not exist in the trace
    pub dangling: u64,
    /// Shuffle the span array so parents may come after children
    pub shuffle: bool,
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            span_count: 40,
            extra_roots: 10,
            follows_from: 20,
            dangling: 5,
            shuffle: true,
        }
    }
}

/// Generate an acyclic trace; span `i` only ever points at spans `< i`
/// in creation order, so every CHILD_OF chain ends at a root or a dangling id
pub fn generate_trace(seed: u64, opts: GenOptions) -> Trace {
    let mut rng = Lcg::new(seed);
    let mut trace = Trace::new(format!("trace-{}", seed));

    for p in 0..3 {
        trace.processes.insert(
            format!("p{}", p),
            Process {
                service_name: format!("service-{}", p),
                tags: Vec::new(),
            },
        );
    }

    let base = 1_600_000_000_000_000;
    let mut spans = Vec::with_capacity(opts.span_count);

    for i in 0..opts.span_count {
        let start = base + rng.below(1_000_000);
        let duration = 1 + rng.below(2_000_000);
        let process = format!("p{}", rng.below(3));
        let mut span = Span::new(
            format!("s{}", i),
            process,
            format!("op-{}", rng.below(7)),
            start,
            duration,
        );

        if i > 0 && !rng.chance(opts.extra_roots) {
            if rng.chance(opts.dangling) {
                span = span.child_of(format!("missing-{}", i));
            } else {
                span = span.child_of(format!("s{}", rng.below(i as u64)));
            }
        }

        if i > 0 && rng.chance(opts.follows_from) {
            span = span.follows_from(format!("s{}", rng.below(i as u64)));
        }

        spans.push(span);
    }

    if opts.shuffle {
        for i in (1..spans.len()).rev() {
            let j = rng.below(i as u64 + 1) as usize;
            spans.swap(i, j);
        }
    }

    trace.spans = spans;
    trace
}

/// `root(0..1_000_000) -> a -> (b, c)` with one process
pub fn simple_trace() -> Trace {
    let mut trace = Trace::new("simple");
    trace.processes.insert(
        "p1".to_string(),
        Process {
            service_name: "api".to_string(),
            tags: Vec::new(),
        },
    );
    trace.spans = vec![
        Span::new("root", "p1", "GET /", 1_000_000, 600_000),
        Span::new("a", "p1", "load", 1_100_000, 300_000).child_of("root"),
        Span::new("b", "p1", "query", 1_150_000, 100_000).child_of("a"),
        Span::new("c", "p1", "render", 1_300_000, 50_000).child_of("a"),
    ];
    trace
}

/// Seeds used by the property-style tests
pub fn seeds() -> impl Iterator<Item = u64> {
    1..=60
}
