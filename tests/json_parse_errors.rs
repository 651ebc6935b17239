//! Purpose: Regression coverage for parse-failure category mapping.
//! Exports: Integration tests only.
//! Role: Verify stable category labels used by malformed-input diagnostics.
//! Invariants: Category mapping remains deterministic for representative errors.
//! Notes: Uses source include to exercise internal helper logic without widening API surface.
#![allow(dead_code)]

#[path = "../src/json/parse.rs"]
mod parse;

use parse::ParseFailureCategory;
use serde_json::Value;

#[test]
fn category_mapping_handles_syntax_and_truncation() {
    let syntax_err = parse::from_slice::<Value>(br#"{"a":}"#).unwrap_err();
    assert_eq!(
        parse::categorize_error(&syntax_err),
        ParseFailureCategory::Syntax
    );

    let eof_err = parse::from_slice::<Value>(br#"{"name":"x","data":["#).unwrap_err();
    assert_eq!(
        parse::categorize_error(&eof_err),
        ParseFailureCategory::TruncatedInput
    );
}

#[test]
fn category_mapping_handles_numeric_and_depth_errors() {
    let number_err = parse::from_slice::<Value>(br#"{"n":1e400}"#).unwrap_err();
    assert_eq!(
        parse::categorize_error(&number_err),
        ParseFailureCategory::NumericRange
    );

    let deep = format!("{}0{}", "[".repeat(256), "]".repeat(256));
    let depth_err = parse::from_slice::<Value>(deep.as_bytes()).unwrap_err();
    assert_eq!(
        parse::categorize_error(&depth_err),
        ParseFailureCategory::DepthLimit
    );
}

#[test]
fn category_mapping_handles_encoding_messages() {
    let bad_escape = parse::from_slice::<Value>(br#"{"k":"\ud800"}"#).unwrap_err();
    assert_eq!(
        parse::categorize_error(&bad_escape),
        ParseFailureCategory::Encoding
    );

    assert_eq!(
        parse::categorize_message("invalid unicode code point at line 1 column 9"),
        ParseFailureCategory::Encoding
    );
    assert_eq!(
        parse::categorize_message("unexpected end of hex escape at line 1 column 13"),
        ParseFailureCategory::Encoding
    );
    assert_eq!(
        parse::categorize_message("invalid escape at line 1 column 8"),
        ParseFailureCategory::Unknown
    );
}

#[test]
fn hint_contains_category_context_and_position() {
    let err = parse::from_slice::<Value>(b"{\n  \"name\": ,\n}").unwrap_err();
    let hint = parse::hint_for_error(&err, "conf.json");
    assert!(hint.contains("parse category: syntax"));
    assert!(hint.contains("context: conf.json"));
    assert!(hint.contains("at line 2"));
}

#[test]
fn unknown_category_fallback_is_stable() {
    assert_eq!(
        parse::categorize_message("opaque parser issue"),
        ParseFailureCategory::Unknown
    );
    assert_eq!(ParseFailureCategory::Unknown.label(), "unknown");
}
