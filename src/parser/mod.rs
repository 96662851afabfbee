//! Trace parsing and data model.
//!
//! This module handles:
//! - Defining the trace model (spans, processes, references)
//! - Parsing Jaeger JSON from files or in-memory values
//! - Unwrapping the query API envelope

pub mod jaeger;
pub mod schema;

// Re-export main types
pub use jaeger::{parse_trace, parse_trace_str, read_trace};
pub use schema::{KeyValue, Log, Process, RefType, Span, SpanReference, Trace};
