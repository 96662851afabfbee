use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;
use trace_lens::parser::{parse_trace, parse_trace_str, read_trace, RefType};
use trace_lens::utils::error::ParseError;

fn jaeger_trace() -> serde_json::Value {
    json!({
        "traceID": "4bf92f3577b34da6",
        "spans": [
            {
                "traceID": "4bf92f3577b34da6",
                "spanID": "root",
                "operationName": "HTTP GET /checkout",
                "references": [],
                "startTime": 1700000000000000u64,
                "duration": 1302000,
                "tags": [{ "key": "http.status_code", "type": "int64", "value": 200 }],
                "logs": [],
                "processID": "p1",
                "warnings": null
            },
            {
                "traceID": "4bf92f3577b34da6",
                "spanID": "child",
                "operationName": "SELECT orders",
                "references": [
                    { "refType": "FOLLOWS_FROM", "traceID": "4bf92f3577b34da6", "spanID": "other" },
                    { "refType": "CHILD_OF", "traceID": "4bf92f3577b34da6", "spanID": "root" }
                ],
                "startTime": 1700000000100000u64,
                "duration": 90000,
                "processID": "p2"
            }
        ],
        "processes": {
            "p1": { "serviceName": "frontend", "tags": [] },
            "p2": { "serviceName": "postgres", "tags": [] }
        },
        "warnings": null
    })
}

#[test]
fn test_parse_bare_trace() {
    let trace = parse_trace(&jaeger_trace()).unwrap();

    assert_eq!(trace.trace_id, "4bf92f3577b34da6");
    assert_eq!(trace.spans.len(), 2);
    assert_eq!(trace.spans[1].references[0].ref_type, RefType::FollowsFrom);
    assert_eq!(trace.spans[1].references[1].span_id, "root");
    assert_eq!(trace.processes["p2"].service_name, "postgres");
}

#[test]
fn test_parse_envelope_and_list_match_bare() {
    let bare = parse_trace(&jaeger_trace()).unwrap();

    let envelope = json!({ "data": [jaeger_trace()], "total": 1, "errors": null });
    assert_eq!(parse_trace(&envelope).unwrap(), bare);

    let list = json!([jaeger_trace(), { "traceID": "second", "spans": [] }]);
    assert_eq!(parse_trace(&list).unwrap(), bare);
}

#[test]
fn test_rejects_scalars_and_empty_lists() {
    assert!(matches!(
        parse_trace(&json!(42)),
        Err(ParseError::InvalidFormat(_))
    ));
    assert!(matches!(
        parse_trace(&json!({ "data": [] })),
        Err(ParseError::InvalidFormat(_))
    ));
    assert!(matches!(
        parse_trace_str("{ not json"),
        Err(ParseError::JsonError(_))
    ));
}

#[test]
fn test_unknown_ref_type_is_rejected() {
    let mut raw = jaeger_trace();
    raw["spans"][1]["references"][0]["refType"] = json!("SIBLING_OF");

    assert!(matches!(parse_trace(&raw), Err(ParseError::JsonError(_))));
}

#[test]
fn test_read_trace_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", json!({ "data": [jaeger_trace()] })).unwrap();

    let trace = read_trace(file.path()).unwrap();
    assert_eq!(trace.spans[0].operation_name, "HTTP GET /checkout");

    assert!(matches!(
        read_trace("/nonexistent/trace.json"),
        Err(ParseError::Io(_))
    ));
}
