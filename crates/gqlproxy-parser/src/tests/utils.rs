//! Various test utils.

use crate::GraphQLParseError;
use crate::GraphQLSourceSpan;
use crate::SourcePosition;
use crate::ast::ArgValue;
use crate::ast::Arguments;
use crate::ast::ParsedOperation;
use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;
use indexmap::IndexMap;

/// Creates a mock token with the given kind and a zero-width span.
pub fn mock_token(kind: GraphQLTokenKind<'static>) -> GraphQLToken<'static> {
    let pos = SourcePosition::new(0, 0, 0);
    GraphQLToken::new(kind, GraphQLSourceSpan::empty_at(pos))
}

/// A mock token source that produces tokens from a Vec.
pub struct MockTokenSource {
    tokens: std::vec::IntoIter<GraphQLToken<'static>>,
}

impl MockTokenSource {
    pub fn new(tokens: Vec<GraphQLToken<'static>>) -> Self {
        Self {
            tokens: tokens.into_iter(),
        }
    }
}

impl Iterator for MockTokenSource {
    type Item = GraphQLToken<'static>;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.next()
    }
}

/// Parses a document that is expected to be valid.
pub fn parse_ok(source: &str) -> ParsedOperation {
    match crate::parse_query(source) {
        Ok(operation) => operation,
        Err(err) => panic!(
            "expected `{source}` to parse, got:\n{}",
            err.format_detailed(Some(source)),
        ),
    }
}

/// Parses a document that is expected to be rejected.
pub fn parse_err(source: &str) -> GraphQLParseError {
    match crate::parse_query(source) {
        Ok(operation) => panic!("expected `{source}` to fail, got {operation:?}"),
        Err(err) => err,
    }
}

/// Parses the arguments of the single field of `{ f(<args>) }`.
pub fn field_args(args: &str) -> Arguments {
    let source = format!("{{ f({args}) }}");
    let mut operation = parse_ok(&source);
    assert_eq!(operation.fields.len(), 1);
    operation.fields.remove(0).arguments
}

pub fn string(s: &str) -> ArgValue {
    ArgValue::String(s.to_string())
}

pub fn object<const N: usize>(entries: [(&str, ArgValue); N]) -> ArgValue {
    ArgValue::Object(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect::<IndexMap<_, _>>(),
    )
}
