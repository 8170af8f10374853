//! Tests for Response projections
//!
//! These tests verify:
//! - Type names, including "none" for both null forms
//! - Error replies surface only when the caller asks for them
//! - Text flattening and string-list projection

use bytes::Bytes;
use kvlink::protocol::{Response, NIL};
use kvlink::KvError;

fn bulk(s: &'static str) -> Response {
    Response::Bulk(Some(Bytes::from_static(s.as_bytes())))
}

// =============================================================================
// Type Names
// =============================================================================

#[test]
fn test_type_names() {
    assert_eq!(Response::Simple("OK".into()).type_name(), "string");
    assert_eq!(Response::Error("ERR".into()).type_name(), "error");
    assert_eq!(Response::Integer(1).type_name(), "integer");
    assert_eq!(bulk("x").type_name(), "bulk");
    assert_eq!(Response::Array(Some(vec![])).type_name(), "array");
    assert_eq!(Response::Bulk(None).type_name(), "none");
    assert_eq!(Response::Array(None).type_name(), "none");
}

#[test]
fn test_is_null() {
    assert!(Response::Bulk(None).is_null());
    assert!(Response::Array(None).is_null());
    assert!(!bulk("").is_null());
    assert!(!Response::Array(Some(vec![])).is_null());
}

// =============================================================================
// Error Conversion
// =============================================================================

#[test]
fn test_into_result_converts_error_reply() {
    let err = Response::Error("ERR unknown command 'FOO'".into())
        .into_result()
        .unwrap_err();

    assert!(matches!(err, KvError::Server(_)));
    assert!(err.to_string().contains("unknown command"));
    assert_eq!(err.kind(), "server");
}

#[test]
fn test_into_result_passes_other_replies() {
    assert_eq!(
        Response::Integer(3).into_result().unwrap(),
        Response::Integer(3)
    );
}

// =============================================================================
// Text Projection
// =============================================================================

#[test]
fn test_into_text_scalars() {
    assert_eq!(
        Response::Simple("OK".into()).into_text().unwrap(),
        Some("OK".to_string())
    );
    assert_eq!(Response::Integer(-7).into_text().unwrap(), Some("-7".to_string()));
    assert_eq!(bulk("value").into_text().unwrap(), Some("value".to_string()));
}

#[test]
fn test_into_text_null_is_none() {
    assert_eq!(Response::Bulk(None).into_text().unwrap(), None);
    assert_eq!(Response::Array(None).into_text().unwrap(), None);
}

#[test]
fn test_into_text_keeps_sentinel_lookalike_distinct() {
    // A stored string that happens to equal the display sentinel is still a value
    assert_eq!(bulk("(nil)").into_text().unwrap(), Some(NIL.to_string()));
    assert_eq!(Response::Bulk(None).into_text().unwrap(), None);
}

#[test]
fn test_into_text_flattens_nested_arrays() {
    let reply = Response::Array(Some(vec![
        bulk("a"),
        Response::Array(Some(vec![Response::Integer(1), bulk("b")])),
        Response::Bulk(None),
        bulk("c"),
    ]));

    assert_eq!(reply.into_text().unwrap(), Some("a\n1\nb\n\nc".to_string()));
}

#[test]
fn test_into_text_error_inside_array_fails() {
    let reply = Response::Array(Some(vec![bulk("a"), Response::Error("ERR nested".into())]));
    assert!(matches!(reply.into_text(), Err(KvError::Server(_))));
}

// =============================================================================
// List Projection
// =============================================================================

#[test]
fn test_into_string_list() {
    let reply = Response::Array(Some(vec![
        bulk("foo"),
        Response::Simple("bar".into()),
        Response::Integer(3),
    ]));

    assert_eq!(reply.into_string_list().unwrap(), vec!["foo", "bar", "3"]);
}

#[test]
fn test_into_string_list_null_array_is_empty() {
    assert!(Response::Array(None).into_string_list().unwrap().is_empty());
}

#[test]
fn test_into_string_list_rejects_non_array() {
    match bulk("foo").into_string_list() {
        Err(KvError::UnexpectedReply { expected, actual }) => {
            assert_eq!(expected, "array");
            assert_eq!(actual, "bulk");
        }
        other => panic!("Expected UnexpectedReply, got {:?}", other),
    }
}

#[test]
fn test_into_string_list_rejects_nested_and_null_elements() {
    let nested = Response::Array(Some(vec![Response::Array(Some(vec![]))]));
    assert!(matches!(
        nested.into_string_list(),
        Err(KvError::UnexpectedReply { .. })
    ));

    let with_null = Response::Array(Some(vec![bulk("a"), Response::Bulk(None)]));
    assert!(matches!(
        with_null.into_string_list(),
        Err(KvError::UnexpectedReply { actual: "none", .. })
    ));
}

#[test]
fn test_into_integer() {
    assert_eq!(Response::Integer(2).into_integer().unwrap(), 2);
    assert!(matches!(
        Response::Simple("OK".into()).into_integer(),
        Err(KvError::UnexpectedReply { expected: "integer", .. })
    ));
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn test_display() {
    assert_eq!(Response::Bulk(None).to_string(), "(nil)");
    assert_eq!(Response::Integer(5).to_string(), "(integer) 5");
    assert_eq!(Response::Error("ERR x".into()).to_string(), "(error) ERR x");
    assert_eq!(Response::Array(Some(vec![])).to_string(), "(empty array)");
    assert_eq!(
        Response::Array(Some(vec![bulk("a"), bulk("b")])).to_string(),
        "1) a\n2) b"
    );
}
