//! Tests for lexer error tokens.

use crate::token::GraphQLTokenKind;
use crate::token_source::StrGraphQLTokenSource;

/// Returns the message of the first error token, if any.
fn first_error(source: &str) -> Option<String> {
    StrGraphQLTokenSource::new(source).find_map(|token| match token.kind {
        GraphQLTokenKind::Error { message, .. } => Some(message),
        _ => None,
    })
}

#[test]
fn unterminated_double_quoted_string() {
    assert_eq!(
        first_error(r#"{ chat(content: "hello) }"#).as_deref(),
        Some("Unterminated string literal"),
    );
}

#[test]
fn unterminated_single_quoted_string() {
    assert_eq!(
        first_error("'abc").as_deref(),
        Some("Unterminated string literal"),
    );
}

#[test]
fn newline_inside_string_is_an_error() {
    assert_eq!(
        first_error("\"line\nbreak\"").as_deref(),
        Some("Unterminated string literal"),
    );
}

#[test]
fn unterminated_block_string() {
    assert_eq!(
        first_error("\"\"\"never closed").as_deref(),
        Some("Unterminated block string"),
    );
}

#[test]
fn leading_zero_is_an_error() {
    assert_eq!(
        first_error("007").as_deref(),
        Some("Invalid number: leading zeros are not allowed"),
    );
}

#[test]
fn exponent_without_digits_is_an_error() {
    assert_eq!(
        first_error("1e").as_deref(),
        Some("Invalid number: exponent must have at least one digit"),
    );
}

#[test]
fn number_followed_by_name_is_an_error() {
    assert_eq!(
        first_error("12abc").as_deref(),
        Some("Invalid number: unexpected character after numeric literal"),
    );
}

#[test]
fn lone_minus_is_an_error() {
    assert_eq!(first_error("- 1").as_deref(), Some("Unexpected `-`"));
}

#[test]
fn lone_dot_is_an_error() {
    assert_eq!(first_error(".").as_deref(), Some("Unexpected `.`"));
}

#[test]
fn double_dot_has_a_help_note() {
    let token = StrGraphQLTokenSource::new("..").next().unwrap();
    match token.kind {
        GraphQLTokenKind::Error { message, error_notes } => {
            assert_eq!(message, "Unexpected `..`");
            assert_eq!(error_notes.len(), 1);
        },
        other => panic!("expected error token, got {other:?}"),
    }
}

#[test]
fn invalid_characters_are_errors() {
    assert_eq!(first_error("&").as_deref(), Some("Unexpected character `&`"));
    assert_eq!(first_error("|").as_deref(), Some("Unexpected character `|`"));
    assert_eq!(
        first_error("\u{00A0}").as_deref(),
        Some("Unexpected character U+00A0"),
    );
}

/// Lexing continues after an error so later tokens are still produced.
#[test]
fn lexing_resumes_after_error() {
    let kinds: Vec<_> = StrGraphQLTokenSource::new("& models")
        .map(|token| token.kind)
        .collect();
    assert_eq!(kinds.len(), 3);
    assert!(kinds[0].is_error());
    assert_eq!(kinds[1], GraphQLTokenKind::name_borrowed("models"));
    assert_eq!(kinds[2], GraphQLTokenKind::Eof);
}
