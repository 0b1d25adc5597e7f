//! Tokenizer and recursive-descent parser for the restricted GraphQL dialect
//! served by the proxy.
//!
//! A document holds exactly one operation (`query`, `mutation` or
//! `subscription`, keyword optional for queries). The parser extracts the
//! operation type, the optional operation name and the top-level fields with
//! their arguments. Nested selection sets are consumed and discarded.
//! Fragments, directives and field aliases are rejected.
//!
//! ```
//! use gqlproxy_parser::ast::ArgValue;
//!
//! let operation = gqlproxy_parser::parse_query(
//!     r#"mutation Ask($input: ChatInput!) { chat(input: $input) { id } }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(operation.operation_name.as_deref(), Some("Ask"));
//! assert_eq!(
//!     operation.fields[0].arguments["input"],
//!     ArgValue::Variable("input".to_string()),
//! );
//! ```

pub mod ast;
mod graphql_error_note;
mod graphql_parse_error;
mod graphql_parse_error_kind;
mod graphql_parser;
mod graphql_source_span;
mod graphql_string_parsing_error;
mod graphql_token_stream;
mod source_position;
pub mod token;
pub mod token_source;
mod value_parsing_error;

pub use graphql_error_note::GraphQLErrorNote;
pub use graphql_error_note::GraphQLErrorNoteKind;
pub use graphql_error_note::GraphQLErrorNotes;
pub use graphql_parse_error::GraphQLParseError;
pub use graphql_parse_error_kind::GraphQLParseErrorKind;
pub use graphql_parser::GraphQLParser;
pub use graphql_source_span::GraphQLSourceSpan;
pub use graphql_string_parsing_error::GraphQLStringParsingError;
pub use graphql_token_stream::GraphQLTokenStream;
pub use source_position::SourcePosition;
pub use value_parsing_error::ValueParsingError;

use ast::Arguments;
use ast::ParsedOperation;

/// Parses a query document containing exactly one operation.
pub fn parse_query(source: &str) -> Result<ParsedOperation, GraphQLParseError> {
    GraphQLParser::new(source).parse_operation()
}

/// Parses a bare argument fragment, e.g. `role: "user", content: "hi"` or
/// `(max_tokens: 200)`.
pub fn parse_arguments(source: &str) -> Result<Arguments, GraphQLParseError> {
    GraphQLParser::new(source).parse_arguments()
}

#[cfg(test)]
mod tests;
