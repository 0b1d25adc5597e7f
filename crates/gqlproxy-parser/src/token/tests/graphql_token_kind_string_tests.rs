//! Tests for `GraphQLTokenKind::parse_string_value()`.

use crate::GraphQLStringParsingError;
use crate::token::GraphQLTokenKind;

fn cook(raw: &str) -> Result<String, GraphQLStringParsingError> {
    GraphQLTokenKind::string_value_borrowed(raw)
        .parse_string_value()
        .expect("StringValue token")
}

// =============================================================================
// Double-quoted strings
// =============================================================================

#[test]
fn plain_double_quoted_string() {
    assert_eq!(cook(r#""hello""#).unwrap(), "hello");
}

#[test]
fn empty_double_quoted_string() {
    assert_eq!(cook(r#""""#).unwrap(), "");
}

#[test]
fn standard_escapes_are_processed() {
    assert_eq!(
        cook(r#""a\nb\tc\\d\"e\/f""#).unwrap(),
        "a\nb\tc\\d\"e/f",
    );
}

#[test]
fn fixed_unicode_escape() {
    assert_eq!(cook(r#""\u0041\u00E9""#).unwrap(), "Aé");
}

#[test]
fn braced_unicode_escape() {
    assert_eq!(cook(r#""\u{1F600}""#).unwrap(), "😀");
}

#[test]
fn escaped_single_quote_is_invalid_in_double_quoted_string() {
    assert_eq!(
        cook(r#""it\'s""#),
        Err(GraphQLStringParsingError::InvalidEscapeSequence("\\'".to_string())),
    );
}

#[test]
fn unknown_escape_is_an_error() {
    assert_eq!(
        cook(r#""\q""#),
        Err(GraphQLStringParsingError::InvalidEscapeSequence("\\q".to_string())),
    );
}

#[test]
fn short_unicode_escape_is_an_error() {
    assert!(matches!(
        cook(r#""\u12""#),
        Err(GraphQLStringParsingError::InvalidUnicodeEscape(_)),
    ));
}

#[test]
fn surrogate_unicode_escape_is_an_error() {
    assert!(matches!(
        cook(r#""\uD800""#),
        Err(GraphQLStringParsingError::InvalidUnicodeEscape(_)),
    ));
}

// =============================================================================
// Single-quoted strings
// =============================================================================

#[test]
fn plain_single_quoted_string() {
    assert_eq!(cook("'user'").unwrap(), "user");
}

#[test]
fn single_quoted_string_with_escaped_quote() {
    assert_eq!(cook(r"'it\'s'").unwrap(), "it's");
}

#[test]
fn single_quoted_string_may_contain_double_quotes() {
    assert_eq!(cook(r#"'say "hi"'"#).unwrap(), "say \"hi\"");
}

// =============================================================================
// Block strings
// =============================================================================

#[test]
fn block_string_strips_common_indent() {
    let raw = "\"\"\"\n    first\n      second\n    third\n\"\"\"";
    assert_eq!(cook(raw).unwrap(), "first\n  second\nthird");
}

#[test]
fn block_string_keeps_escapes_raw() {
    assert_eq!(cook(r#""""a\nb""""#).unwrap(), "a\\nb");
}

#[test]
fn block_string_unescapes_triple_quote() {
    assert_eq!(cook(r#""""say \"""hi\"""""""#).unwrap(), "say \"\"\"hi\"\"\"");
}

#[test]
fn non_string_token_returns_none() {
    assert_eq!(GraphQLTokenKind::Null.parse_string_value(), None);
}
