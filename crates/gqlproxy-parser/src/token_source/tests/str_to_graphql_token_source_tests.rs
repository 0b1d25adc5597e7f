//! Tests for the token kinds produced by `StrGraphQLTokenSource`.

use crate::token::GraphQLTokenKind;
use crate::token_source::StrGraphQLTokenSource;

fn kinds(source: &str) -> Vec<GraphQLTokenKind<'_>> {
    StrGraphQLTokenSource::new(source)
        .map(|token| token.kind)
        .collect()
}

#[test]
fn empty_input_yields_only_eof() {
    assert_eq!(kinds(""), vec![GraphQLTokenKind::Eof]);
}

#[test]
fn whitespace_only_input_yields_only_eof() {
    assert_eq!(kinds(" \t\r\n\u{FEFF} "), vec![GraphQLTokenKind::Eof]);
}

#[test]
fn iterator_is_fused_after_eof() {
    let mut source = StrGraphQLTokenSource::new("x");
    assert!(source.next().is_some());
    assert!(matches!(source.next().map(|t| t.kind), Some(GraphQLTokenKind::Eof)));
    assert!(source.next().is_none());
    assert!(source.next().is_none());
}

#[test]
fn punctuators() {
    assert_eq!(
        kinds("! $ ( ) : = @ [ ] { } ..."),
        vec![
            GraphQLTokenKind::Bang,
            GraphQLTokenKind::Dollar,
            GraphQLTokenKind::ParenOpen,
            GraphQLTokenKind::ParenClose,
            GraphQLTokenKind::Colon,
            GraphQLTokenKind::Equals,
            GraphQLTokenKind::At,
            GraphQLTokenKind::SquareBracketOpen,
            GraphQLTokenKind::SquareBracketClose,
            GraphQLTokenKind::CurlyBraceOpen,
            GraphQLTokenKind::CurlyBraceClose,
            GraphQLTokenKind::Ellipsis,
            GraphQLTokenKind::Eof,
        ],
    );
}

#[test]
fn names_and_keywords() {
    assert_eq!(
        kinds("chat _private model2 true false null"),
        vec![
            GraphQLTokenKind::name_borrowed("chat"),
            GraphQLTokenKind::name_borrowed("_private"),
            GraphQLTokenKind::name_borrowed("model2"),
            GraphQLTokenKind::True,
            GraphQLTokenKind::False,
            GraphQLTokenKind::Null,
            GraphQLTokenKind::Eof,
        ],
    );
}

/// Keyword literals are case-sensitive; `True` is an ordinary name.
#[test]
fn capitalized_keyword_is_a_name() {
    assert_eq!(
        kinds("True"),
        vec![GraphQLTokenKind::name_borrowed("True"), GraphQLTokenKind::Eof],
    );
}

#[test]
fn numbers() {
    assert_eq!(
        kinds("0 1000 -5 0.7 -1.5e-3 2E10"),
        vec![
            GraphQLTokenKind::int_value_borrowed("0"),
            GraphQLTokenKind::int_value_borrowed("1000"),
            GraphQLTokenKind::int_value_borrowed("-5"),
            GraphQLTokenKind::float_value_borrowed("0.7"),
            GraphQLTokenKind::float_value_borrowed("-1.5e-3"),
            GraphQLTokenKind::float_value_borrowed("2E10"),
            GraphQLTokenKind::Eof,
        ],
    );
}

#[test]
fn double_quoted_string_keeps_raw_text() {
    assert_eq!(
        kinds(r#""he said \"hi\"""#),
        vec![
            GraphQLTokenKind::string_value_borrowed(r#""he said \"hi\"""#),
            GraphQLTokenKind::Eof,
        ],
    );
}

#[test]
fn single_quoted_string_keeps_raw_text() {
    assert_eq!(
        kinds(r"'it\'s'"),
        vec![
            GraphQLTokenKind::string_value_borrowed(r"'it\'s'"),
            GraphQLTokenKind::Eof,
        ],
    );
}

/// Braces inside a string never surface as delimiter tokens.
#[test]
fn braces_inside_strings_are_not_tokens() {
    assert_eq!(
        kinds(r#""{ } ( ) [ ]""#),
        vec![
            GraphQLTokenKind::string_value_borrowed(r#""{ } ( ) [ ]""#),
            GraphQLTokenKind::Eof,
        ],
    );
}

#[test]
fn block_string_spans_lines() {
    let source = "\"\"\"\n  line one\n  line two\n\"\"\"";
    assert_eq!(
        kinds(source),
        vec![
            GraphQLTokenKind::string_value_borrowed(source),
            GraphQLTokenKind::Eof,
        ],
    );
}

#[test]
fn commas_are_skipped() {
    assert_eq!(
        kinds("a,, b,"),
        vec![
            GraphQLTokenKind::name_borrowed("a"),
            GraphQLTokenKind::name_borrowed("b"),
            GraphQLTokenKind::Eof,
        ],
    );
}

#[test]
fn comments_are_skipped() {
    let tokens: Vec<_> = StrGraphQLTokenSource::new("# models query\nmodels # done").collect();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, GraphQLTokenKind::name_borrowed("models"));
    assert_eq!(tokens[0].span.start_inclusive.line(), 1);
    assert_eq!(tokens[1].kind, GraphQLTokenKind::Eof);
}

#[test]
fn hash_inside_a_string_is_not_a_comment() {
    assert_eq!(
        kinds(r##""# not a comment""##),
        vec![
            GraphQLTokenKind::string_value_borrowed(r##""# not a comment""##),
            GraphQLTokenKind::Eof,
        ],
    );
}

#[test]
fn adjacency_ignores_separators() {
    let tokens: Vec<_> = StrGraphQLTokenSource::new("gpt-4o a,b c").collect();
    assert!(tokens[1].is_adjacent_to(&tokens[0].span));
    assert!(!tokens[2].is_adjacent_to(&tokens[1].span));
    assert!(!tokens[3].is_adjacent_to(&tokens[2].span));
    assert!(!tokens[4].is_adjacent_to(&tokens[3].span));
}
