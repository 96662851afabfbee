//! trace-lens
//!
//! Span tree construction, trace derivations and timeline helpers for
//! Jaeger-format distributed traces.
//!
//! This crate provides the core implementation for the
//! `trace-lens` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! trace-lens summary --input trace.json
//! trace-lens spans --input trace.json --sort duration --desc
//! ```
//!
//! As a library, load a trace with [`parser::read_trace`], build its tree
//! with [`tree::build_span_tree`] and derive views with [`selectors`] and
//! [`timeline`].

pub mod commands;
pub mod output;
pub mod parser;
pub mod report;
pub mod selectors;
pub mod timeline;
pub mod tree;
pub mod utils;
