//! Loader for Jaeger trace JSON.
//!
//! Accepts a bare trace object, the query API envelope (`{"data": [...]}`),
//! or a plain array of traces. Only the first trace is kept.

use super::schema::Trace;
use crate::utils::config::TRACE_ENVELOPE_FIELDS;
use crate::utils::error::ParseError;
use log::{debug, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Shape of the JSON document the trace was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TraceFormat {
    /// A single trace object with `traceID` and `spans`
    Bare,
    /// Query API response wrapping a list of traces
    Envelope,
    /// Top-level array of traces
    List,
}

/// Parse a trace from raw JSON
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `ParseError::JsonError` - The trace object does not match the model
/// * `ParseError::InvalidFormat` - Not an object/array, or no trace inside
pub fn parse_trace(raw: &serde_json::Value) -> Result<Trace, ParseError> {
    let (trace_value, format) = detect_trace_format(raw)?;
    debug!("Detected trace format: {:?}", format);

    let trace: Trace = serde_json::from_value(trace_value.clone())?;

    debug!(
        "Parsed trace {} with {} spans and {} processes",
        trace.trace_id,
        trace.spans.len(),
        trace.processes.len()
    );

    Ok(trace)
}

/// Parse a trace from a JSON string
pub fn parse_trace_str(input: &str) -> Result<Trace, ParseError> {
    let raw: serde_json::Value = serde_json::from_str(input)?;
    parse_trace(&raw)
}

/// Read and parse a trace file from disk
///
/// # Errors
/// * `ParseError::Io` - File cannot be opened
/// * Any error from [`parse_trace`]
pub fn read_trace(input_path: impl AsRef<Path>) -> Result<Trace, ParseError> {
    let input_path = input_path.as_ref();
    debug!("Reading trace from: {}", input_path.display());

    let file = File::open(input_path)?;
    let raw: serde_json::Value = serde_json::from_reader(BufReader::new(file))?;

    parse_trace(&raw)
}

/// Locate the trace object inside the document
///
/// **Private** - internal helper for parse_trace
fn detect_trace_format(
    raw: &serde_json::Value,
) -> Result<(&serde_json::Value, TraceFormat), ParseError> {
    match raw {
        serde_json::Value::Object(obj) => {
            if obj.contains_key("traceID") {
                return Ok((raw, TraceFormat::Bare));
            }

            let wrapped = TRACE_ENVELOPE_FIELDS
                .iter()
                .find_map(|field| obj.get(*field).and_then(|v| v.as_array()));

            match wrapped {
                Some(traces) => Ok((first_trace(traces)?, TraceFormat::Envelope)),
                None => Err(ParseError::InvalidFormat(
                    "Object has neither a traceID nor a data array".to_string(),
                )),
            }
        }

        serde_json::Value::Array(traces) => Ok((first_trace(traces)?, TraceFormat::List)),

        _ => Err(ParseError::InvalidFormat(
            "Trace must be a JSON object or array".to_string(),
        )),
    }
}

fn first_trace(traces: &[serde_json::Value]) -> Result<&serde_json::Value, ParseError> {
    if traces.len() > 1 {
        warn!(
            "Document contains {} traces, only the first is used",
            traces.len()
        );
    }

    traces
        .first()
        .ok_or_else(|| ParseError::InvalidFormat("Trace list is empty".to_string()))
}
