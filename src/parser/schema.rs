//! Trace data model, matching the Jaeger JSON wire names.
//!
//! Timestamps and durations are integer microseconds.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of a reference from one span to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefType {
    /// Defines tree parentage
    ChildOf,
    /// Causal link only, never a parent edge
    FollowsFrom,
}

/// Reference to another span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanReference {
    pub ref_type: RefType,

    #[serde(rename = "spanID")]
    pub span_id: String,

    #[serde(rename = "traceID", default)]
    pub trace_id: String,
}

/// Tag attached to a span, log or process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,

    #[serde(default)]
    pub value: serde_json::Value,
}

/// Timestamped log record inside a span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Log {
    pub timestamp: u64,

    #[serde(default)]
    pub fields: Vec<KeyValue>,
}

/// The logical service/instance that emitted spans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub service_name: String,

    #[serde(default)]
    pub tags: Vec<KeyValue>,
}

/// One timed unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    #[serde(rename = "traceID", default)]
    pub trace_id: String,

    #[serde(rename = "spanID")]
    pub span_id: String,

    #[serde(rename = "processID")]
    pub process_id: String,

    pub operation_name: String,

    /// Microseconds since epoch
    pub start_time: u64,

    /// Microseconds
    pub duration: u64,

    #[serde(default)]
    pub flags: u32,

    #[serde(default)]
    pub references: Vec<SpanReference>,

    #[serde(default)]
    pub tags: Vec<KeyValue>,

    #[serde(default)]
    pub logs: Vec<Log>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
}

impl Span {
    /// Create a span without references, tags or logs
    pub fn new(
        span_id: impl Into<String>,
        process_id: impl Into<String>,
        operation_name: impl Into<String>,
        start_time: u64,
        duration: u64,
    ) -> Self {
        Self {
            trace_id: String::new(),
            span_id: span_id.into(),
            process_id: process_id.into(),
            operation_name: operation_name.into(),
            start_time,
            duration,
            flags: 0,
            references: Vec::new(),
            tags: Vec::new(),
            logs: Vec::new(),
            warnings: None,
        }
    }

    /// Append a reference of the given kind
    pub fn with_reference(mut self, ref_type: RefType, span_id: impl Into<String>) -> Self {
        self.references.push(SpanReference {
            ref_type,
            span_id: span_id.into(),
            trace_id: self.trace_id.clone(),
        });
        self
    }

    /// Append a CHILD_OF reference
    pub fn child_of(self, parent_id: impl Into<String>) -> Self {
        self.with_reference(RefType::ChildOf, parent_id)
    }

    /// Append a FOLLOWS_FROM reference
    pub fn follows_from(self, span_id: impl Into<String>) -> Self {
        self.with_reference(RefType::FollowsFrom, span_id)
    }
}

/// A complete trace as delivered by the Jaeger query API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(rename = "traceID")]
    pub trace_id: String,

    /// Spans in the order received, not necessarily causal order
    #[serde(default)]
    pub spans: Vec<Span>,

    /// Process id -> process
    #[serde(default)]
    pub processes: HashMap<String, Process>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
}

impl Trace {
    pub fn new(trace_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            spans: Vec::new(),
            processes: HashMap::new(),
            warnings: None,
        }
    }
}
