//! Tests for the standalone `parse_arguments()` entry point.

use crate::GraphQLParseErrorKind;
use crate::ast::ArgValue;
use crate::parse_arguments;
use crate::tests::utils::string;

#[test]
fn bare_fragment() {
    let args = parse_arguments(r#"role: "user", content: "hi""#).unwrap();

    assert_eq!(args.len(), 2);
    assert_eq!(args["role"], string("user"));
    assert_eq!(args["content"], string("hi"));
}

#[test]
fn parenthesized_fragment() {
    let args = parse_arguments("(max_tokens: 200, stream: true)").unwrap();

    assert_eq!(args["max_tokens"], ArgValue::Number(200.0));
    assert_eq!(args["stream"], ArgValue::Boolean(true));
}

#[test]
fn empty_fragment() {
    assert!(parse_arguments("").unwrap().is_empty());
    assert!(parse_arguments("()").unwrap().is_empty());
    assert!(parse_arguments("  # nothing\n").unwrap().is_empty());
}

#[test]
fn fragment_without_commas() {
    let args = parse_arguments("a: 1 b: 2").unwrap();
    assert_eq!(args.keys().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn missing_colon_is_an_error() {
    let err = parse_arguments("model \"x\"").unwrap_err();
    assert!(matches!(err.kind(), GraphQLParseErrorKind::UnexpectedToken { .. }));
}

#[test]
fn missing_value_is_an_error() {
    let err = parse_arguments("model:").unwrap_err();
    assert!(matches!(err.kind(), GraphQLParseErrorKind::UnexpectedEof { .. }));
}

#[test]
fn content_after_closing_paren_is_an_error() {
    let err = parse_arguments("(a: 1) b: 2").unwrap_err();
    assert_eq!(err.kind(), &GraphQLParseErrorKind::TrailingContent);
}
