//! Recursive descent parser for single-operation query documents.
//!
//! This module provides [`GraphQLParser`], a generic parser that works with any
//! token source implementing [`GraphQLTokenSource`]. It accepts the restricted
//! dialect the proxy serves: one operation per document, top-level fields with
//! arguments, nested selection sets that are skipped rather than interpreted,
//! and no fragments, directives or aliases.
//!
//! # Architecture
//!
//! Most grammar rules have a corresponding `parse_*` method that returns
//! `Result<T, ()>`, where `Err(())` indicates a parse error was recorded via
//! `record_error()`. A delimiter stack tracks open `{`, `(` and `[` so that
//! unclosed-delimiter errors can point back at the opening token.
//!
//! # Error Recovery
//!
//! Parsing is fail-fast with one exception: a malformed object or list literal
//! nested inside an argument value (`{ a: }`, `[1, :]`) degrades to an empty
//! object or list. The parser skips to the literal's matching close delimiter,
//! logs the recovered errors at `debug` level and carries on. An unclosed
//! literal is still fatal.

use crate::GraphQLParseError;
use crate::GraphQLParseErrorKind;
use crate::GraphQLSourceSpan;
use crate::GraphQLTokenStream;
use crate::SourcePosition;
use crate::ValueParsingError;
use crate::ast::ArgValue;
use crate::ast::Arguments;
use crate::ast::OperationType;
use crate::ast::ParsedField;
use crate::ast::ParsedOperation;
use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;
use crate::token_source::GraphQLTokenSource;
use crate::token_source::StrGraphQLTokenSource;
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::borrow::Cow;

// =============================================================================
// Delimiter tracking
// =============================================================================

/// Context in which a delimiter was opened, for error messages.
#[derive(Debug, Clone, Copy)]
enum DelimiterContext {
    /// `{ field ... }` of the operation
    OperationBody,
    /// `{ ... }` following a field, skipped without interpretation
    NestedSelectionSet,
    /// `(arg: value)` in field arguments
    FieldArguments,
    /// `($var: Type)` in operation variable definitions
    VariableDefinitions,
    /// `[value, ...]` in list literals
    ListValue,
    /// `{ field: value }` in object literals
    ObjectValue,
}

impl DelimiterContext {
    fn description(&self) -> &'static str {
        match self {
            DelimiterContext::OperationBody => "operation body",
            DelimiterContext::NestedSelectionSet => "selection set",
            DelimiterContext::FieldArguments => "field arguments",
            DelimiterContext::VariableDefinitions => "variable definitions",
            DelimiterContext::ListValue => "list value",
            DelimiterContext::ObjectValue => "object value",
        }
    }
}

/// Tracks an open delimiter.
#[derive(Debug, Clone)]
struct OpenDelimiter {
    span: GraphQLSourceSpan,
    context: DelimiterContext,
}

/// Which kind of nested literal is being parsed.
#[derive(Debug, Clone, Copy)]
enum LiteralKind {
    Object,
    List,
}

// =============================================================================
// Main parser struct
// =============================================================================

/// A recursive descent parser for single-operation query documents.
///
/// # Usage
///
/// ```
/// use gqlproxy_parser::GraphQLParser;
/// use gqlproxy_parser::ast::ArgValue;
/// use gqlproxy_parser::ast::OperationType;
///
/// let operation = GraphQLParser::new(r#"mutation { chat(model: "deepseek-chat") { id } }"#)
///     .parse_operation()
///     .unwrap();
///
/// assert_eq!(operation.operation_type, OperationType::Mutation);
/// assert_eq!(operation.fields[0].name, "chat");
/// assert_eq!(
///     operation.fields[0].arguments["model"],
///     ArgValue::String("deepseek-chat".to_string()),
/// );
/// ```
pub struct GraphQLParser<'src, TTokenSource: GraphQLTokenSource<'src>> {
    /// The underlying token stream with lookahead support.
    token_stream: GraphQLTokenStream<'src, TTokenSource>,

    /// Recorded parse errors. The first one is reported to the caller.
    errors: Vec<GraphQLParseError>,

    /// Stack of open delimiters, innermost last.
    delimiter_stack: SmallVec<[OpenDelimiter; 8]>,

    /// Current nesting depth of value parsing.
    recursion_depth: usize,

    /// End position of the most recently consumed token, used to anchor EOF
    /// errors to the last known source location.
    last_end_position: Option<SourcePosition>,

    /// The text being parsed, when known. Opaque values are sliced from it.
    source: Option<&'src str>,
}

impl<'src> GraphQLParser<'src, StrGraphQLTokenSource<'src>> {
    /// Creates a new parser from a string-like source.
    pub fn new<S: AsRef<str> + ?Sized>(source: &'src S) -> Self {
        let source = source.as_ref();
        let mut parser = Self::from_token_source(StrGraphQLTokenSource::new(source));
        parser.source = Some(source);
        parser
    }
}

impl<'src, TTokenSource: GraphQLTokenSource<'src>> GraphQLParser<'src, TTokenSource> {
    /// Maximum nesting depth of object and list literals.
    ///
    /// Prevents stack overflow from adversarial inputs like `[[[[[...`.
    const MAX_RECURSION_DEPTH: usize = 64;

    pub fn from_token_source(token_source: TTokenSource) -> Self {
        Self {
            token_stream: GraphQLTokenStream::new(token_source),
            errors: Vec::new(),
            delimiter_stack: SmallVec::new(),
            recursion_depth: 0,
            last_end_position: None,
            source: None,
        }
    }

    // =========================================================================
    // Public entry points
    // =========================================================================

    /// Parses a complete query document containing exactly one operation.
    pub fn parse_operation(mut self) -> Result<ParsedOperation, GraphQLParseError> {
        let result = self
            .parse_operation_definition()
            .and_then(|operation| {
                self.expect_end_of_document()?;
                Ok(operation)
            });
        self.finish(result)
    }

    /// Parses a bare argument fragment such as `model: "x", max_tokens: 10`,
    /// with or without enclosing parentheses.
    pub fn parse_arguments(mut self) -> Result<Arguments, GraphQLParseError> {
        let result = self.parse_arguments_fragment().and_then(|arguments| {
            self.expect_end_of_document()?;
            Ok(arguments)
        });
        self.finish(result)
    }

    fn finish<T>(mut self, result: Result<T, ()>) -> Result<T, GraphQLParseError> {
        match result {
            Ok(value) if self.errors.is_empty() => Ok(value),
            Ok(_) | Err(()) => Err(self.take_first_error()),
        }
    }

    fn take_first_error(&mut self) -> GraphQLParseError {
        if self.errors.is_empty() {
            let span = self.eof_span();
            return GraphQLParseError::new(
                "invalid document",
                span,
                GraphQLParseErrorKind::UnexpectedToken {
                    expected: vec![],
                    found: String::new(),
                },
            );
        }
        self.errors.swap_remove(0)
    }

    // =========================================================================
    // Error recording
    // =========================================================================

    fn record_error(&mut self, error: GraphQLParseError) {
        self.errors.push(error);
    }

    fn push_delimiter(&mut self, span: GraphQLSourceSpan, context: DelimiterContext) {
        self.delimiter_stack.push(OpenDelimiter { span, context });
    }

    fn pop_delimiter(&mut self) -> Option<OpenDelimiter> {
        self.delimiter_stack.pop()
    }

    /// Records an "unclosed delimiter" error at EOF for the innermost open
    /// delimiter.
    fn record_unclosed_delimiter(&mut self, delimiter: &str) {
        let span = self.eof_span();
        let open_delim = self.pop_delimiter();
        let mut error = GraphQLParseError::new(
            format!("unclosed `{delimiter}`"),
            span,
            GraphQLParseErrorKind::UnclosedDelimiter {
                delimiter: delimiter.to_string(),
            },
        );
        if let Some(delim) = open_delim {
            error.add_note_with_span(
                format!("opening `{delimiter}` in {} here", delim.context.description()),
                delim.span,
            );
        }
        self.record_error(error);
    }

    /// Records an error for a construct this parser deliberately rejects.
    fn record_unsupported(&mut self, span: GraphQLSourceSpan, construct: &'static str) {
        self.record_error(GraphQLParseError::new(
            format!("{construct} are not supported"),
            span,
            GraphQLParseErrorKind::Unsupported { construct },
        ));
    }

    /// Converts a lexer error token into a parse error.
    fn handle_lexer_error(&mut self, token: &GraphQLToken<'src>) {
        if let GraphQLTokenKind::Error {
            message,
            error_notes,
        } = &token.kind
        {
            self.record_error(GraphQLParseError::from_lexer_error(
                message.clone(),
                token.span.clone(),
                error_notes.clone(),
            ));
        }
    }

    /// Records an error for an unexpected token. Lexer error tokens and EOF
    /// get their own error kinds.
    fn record_unexpected(&mut self, token: &GraphQLToken<'src>, expected: &[&str]) {
        let expected_list: Vec<String> = expected.iter().map(|e| e.to_string()).collect();
        let expected_display = expected
            .iter()
            .map(|e| format!("`{e}`"))
            .collect::<Vec<_>>()
            .join(" or ");

        match &token.kind {
            GraphQLTokenKind::Error { .. } => self.handle_lexer_error(token),
            GraphQLTokenKind::Eof => {
                let span = self.eof_span();
                self.record_error(GraphQLParseError::new(
                    format!("expected {expected_display}, found end of input"),
                    span,
                    GraphQLParseErrorKind::UnexpectedEof {
                        expected: expected_list,
                    },
                ));
            },
            kind => {
                let found = Self::token_kind_display(kind);
                self.record_error(GraphQLParseError::new(
                    format!("expected {expected_display}, found `{found}`"),
                    token.span.clone(),
                    GraphQLParseErrorKind::UnexpectedToken {
                        expected: expected_list,
                        found,
                    },
                ));
            },
        }
    }

    fn record_eof(&mut self, expected: &[&str]) {
        let span = self.eof_span();
        let expected_display = expected
            .iter()
            .map(|e| format!("`{e}`"))
            .collect::<Vec<_>>()
            .join(" or ");
        self.record_error(GraphQLParseError::new(
            format!("expected {expected_display}"),
            span,
            GraphQLParseErrorKind::UnexpectedEof {
                expected: expected.iter().map(|e| e.to_string()).collect(),
            },
        ));
    }

    // =========================================================================
    // Token expectation helpers
    // =========================================================================

    /// Expects a specific token kind and consumes it.
    fn expect(&mut self, expected_kind: &GraphQLTokenKind) -> Result<GraphQLToken<'src>, ()> {
        let expected = Self::token_kind_display(expected_kind);
        let mismatch = match self.token_stream.peek() {
            None => {
                self.record_eof(&[expected.as_str()]);
                return Err(());
            },
            Some(token) if Self::token_kinds_match(&token.kind, expected_kind) => None,
            Some(token) => Some(token.clone()),
        };
        if let Some(token) = mismatch {
            self.record_unexpected(&token, &[expected.as_str()]);
            return Err(());
        }
        self.consume_token().ok_or(())
    }

    /// Expects a name token and returns its value along with its span.
    ///
    /// `true`, `false` and `null` are valid names in GraphQL; the lexer gives
    /// them their own token kinds for value contexts, so they are accepted
    /// here too.
    fn expect_name(&mut self) -> Result<(Cow<'src, str>, GraphQLSourceSpan), ()> {
        let mismatch = match self.token_stream.peek() {
            None => {
                self.record_eof(&["name"]);
                return Err(());
            },
            Some(token) => match &token.kind {
                GraphQLTokenKind::Name(_)
                | GraphQLTokenKind::True
                | GraphQLTokenKind::False
                | GraphQLTokenKind::Null => None,
                _ => Some(token.clone()),
            },
        };
        if let Some(token) = mismatch {
            self.record_unexpected(&token, &["name"]);
            return Err(());
        }
        let token = self.consume_token().ok_or(())?;
        let name = match token.kind {
            GraphQLTokenKind::Name(s) => s,
            GraphQLTokenKind::True => Cow::Borrowed("true"),
            GraphQLTokenKind::False => Cow::Borrowed("false"),
            GraphQLTokenKind::Null => Cow::Borrowed("null"),
            _ => return Err(()),
        };
        Ok((name, token.span))
    }

    fn peek_is(&mut self, kind: &GraphQLTokenKind) -> bool {
        match self.token_stream.peek() {
            Some(token) => Self::token_kinds_match(&token.kind, kind),
            None => false,
        }
    }

    /// Returns `true` if the next token can be used as a name.
    fn peek_is_name(&mut self) -> bool {
        matches!(
            self.token_stream.peek().map(|t| &t.kind),
            Some(
                GraphQLTokenKind::Name(_)
                    | GraphQLTokenKind::True
                    | GraphQLTokenKind::False
                    | GraphQLTokenKind::Null
            )
        )
    }

    fn peek_span(&mut self) -> GraphQLSourceSpan {
        match self.token_stream.peek() {
            Some(token) => token.span.clone(),
            None => self.eof_span(),
        }
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    /// Consumes the next token and tracks its end position.
    fn consume_token(&mut self) -> Option<GraphQLToken<'src>> {
        let token = self.token_stream.consume();
        if let Some(ref t) = token {
            self.last_end_position = Some(t.span.end_exclusive.clone());
        }
        token
    }

    /// Returns a span for EOF errors, anchored to the end of the last consumed
    /// token if available.
    fn eof_span(&self) -> GraphQLSourceSpan {
        match self.last_end_position {
            Some(ref pos) => GraphQLSourceSpan::empty_at(pos.clone()),
            None => GraphQLSourceSpan::empty_at(SourcePosition::new(0, 0, 0)),
        }
    }

    fn token_kind_display(kind: &GraphQLTokenKind) -> String {
        match kind {
            GraphQLTokenKind::Name(s) => s.to_string(),
            GraphQLTokenKind::IntValue(s) => s.to_string(),
            GraphQLTokenKind::FloatValue(s) => s.to_string(),
            GraphQLTokenKind::StringValue(_) => "string".to_string(),
            GraphQLTokenKind::True => "true".to_string(),
            GraphQLTokenKind::False => "false".to_string(),
            GraphQLTokenKind::Null => "null".to_string(),
            GraphQLTokenKind::Eof => "end of input".to_string(),
            GraphQLTokenKind::Error { message, .. } => format!("tokenization error: {message}"),
            punctuator => punctuator.as_punctuator_str().unwrap_or_default().to_string(),
        }
    }

    /// Compares token kinds by variant, ignoring payloads.
    fn token_kinds_match(actual: &GraphQLTokenKind, expected: &GraphQLTokenKind) -> bool {
        std::mem::discriminant(actual) == std::mem::discriminant(expected)
    }

    /// Increments the value nesting depth, failing past the limit. On success
    /// the caller must call `exit_recursion()`.
    fn enter_recursion(&mut self) -> Result<(), ()> {
        self.recursion_depth += 1;
        if self.recursion_depth > Self::MAX_RECURSION_DEPTH {
            let span = self.peek_span();
            self.record_error(GraphQLParseError::new(
                "maximum nesting depth exceeded",
                span,
                GraphQLParseErrorKind::NestingTooDeep,
            ));
            self.recursion_depth -= 1;
            return Err(());
        }
        Ok(())
    }

    fn exit_recursion(&mut self) {
        self.recursion_depth -= 1;
    }

    // =========================================================================
    // Operation
    // =========================================================================

    /// Parses `[keyword [name] [(variables)]] { fields }`.
    fn parse_operation_definition(&mut self) -> Result<ParsedOperation, ()> {
        let keyword = match self.token_stream.peek().map(|t| &t.kind) {
            Some(GraphQLTokenKind::Name(name)) => Some(name.to_string()),
            _ => None,
        };

        let (operation_type, operation_name) = match keyword {
            None => (OperationType::Query, None),
            Some(keyword) => match OperationType::from_keyword(&keyword) {
                Some(operation_type) => {
                    self.consume_token();
                    let operation_name = if self.peek_is_name() {
                        Some(self.expect_name()?.0.into_owned())
                    } else {
                        None
                    };
                    if self.peek_is(&GraphQLTokenKind::ParenOpen) {
                        self.skip_variable_definitions()?;
                    }
                    if self.peek_is(&GraphQLTokenKind::At) {
                        let span = self.peek_span();
                        self.record_unsupported(span, "directives");
                        return Err(());
                    }
                    (operation_type, operation_name)
                },
                None if keyword == "fragment" => {
                    let span = self.peek_span();
                    self.record_unsupported(span, "fragments");
                    return Err(());
                },
                None => {
                    let token = self.token_stream.peek().cloned();
                    if let Some(token) = token {
                        self.record_unexpected(
                            &token,
                            &["{", "query", "mutation", "subscription"],
                        );
                    }
                    return Err(());
                },
            },
        };

        let fields = self.parse_operation_body()?;
        tracing::trace!(
            operation_type = %operation_type,
            field_count = fields.len(),
            "parsed operation"
        );
        Ok(ParsedOperation {
            operation_type,
            operation_name,
            fields,
        })
    }

    /// Consumes `( ... )` after the operation name by balanced-paren scanning.
    /// Variable definitions are not interpreted: variables are looked up by
    /// name at execution time.
    fn skip_variable_definitions(&mut self) -> Result<(), ()> {
        let open_token = self.expect(&GraphQLTokenKind::ParenOpen)?;
        self.push_delimiter(open_token.span, DelimiterContext::VariableDefinitions);

        let mut depth = 1usize;
        loop {
            let Some(token) = self.consume_token() else {
                self.record_unclosed_delimiter("(");
                return Err(());
            };
            match token.kind {
                GraphQLTokenKind::ParenOpen => depth += 1,
                GraphQLTokenKind::ParenClose => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                },
                GraphQLTokenKind::Eof => {
                    self.record_unclosed_delimiter("(");
                    return Err(());
                },
                GraphQLTokenKind::Error { .. } => {
                    self.handle_lexer_error(&token);
                    return Err(());
                },
                _ => {},
            }
        }

        self.pop_delimiter();
        Ok(())
    }

    /// Parses the operation's `{ ... }` into its top-level fields.
    fn parse_operation_body(&mut self) -> Result<Vec<ParsedField>, ()> {
        let open_token = self.expect(&GraphQLTokenKind::CurlyBraceOpen)?;
        self.push_delimiter(open_token.span.clone(), DelimiterContext::OperationBody);

        let mut fields = Vec::new();
        loop {
            let next_kind = self.token_stream.peek().map(|t| t.kind.clone());
            match next_kind {
                Some(GraphQLTokenKind::CurlyBraceClose) => break,
                None | Some(GraphQLTokenKind::Eof) => {
                    self.record_unclosed_delimiter("{");
                    return Err(());
                },
                Some(GraphQLTokenKind::Ellipsis) => {
                    let span = self.peek_span();
                    self.record_unsupported(span, "fragments");
                    return Err(());
                },
                Some(_) => fields.push(self.parse_field()?),
            }
        }

        let close_token = self.expect(&GraphQLTokenKind::CurlyBraceClose)?;
        self.pop_delimiter();

        if fields.is_empty() {
            self.record_error(GraphQLParseError::new(
                "selection set must contain at least one field",
                GraphQLSourceSpan::new(
                    open_token.span.start_inclusive,
                    close_token.span.end_exclusive,
                ),
                GraphQLParseErrorKind::EmptySelectionSet,
            ));
            return Err(());
        }
        Ok(fields)
    }

    /// Parses `name [(arguments)] [{ nested selection }]`.
    fn parse_field(&mut self) -> Result<ParsedField, ()> {
        let (name, name_span) = self.expect_name()?;

        if self.peek_is(&GraphQLTokenKind::Colon) {
            self.record_unsupported(name_span, "field aliases");
            return Err(());
        }

        let arguments = if self.peek_is(&GraphQLTokenKind::ParenOpen) {
            self.parse_argument_list()?
        } else {
            Arguments::new()
        };

        if self.peek_is(&GraphQLTokenKind::At) {
            let span = self.peek_span();
            self.record_unsupported(span, "directives");
            return Err(());
        }

        if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen) {
            self.skip_selection_set()?;
        }

        Ok(ParsedField::new(name, arguments))
    }

    /// Consumes a nested `{ ... }` selection set by counting brace depth over
    /// tokens. String literals are single tokens, so braces inside them never
    /// affect the count.
    fn skip_selection_set(&mut self) -> Result<(), ()> {
        let open_token = self.expect(&GraphQLTokenKind::CurlyBraceOpen)?;
        self.push_delimiter(open_token.span, DelimiterContext::NestedSelectionSet);

        let mut depth = 1usize;
        loop {
            let Some(token) = self.consume_token() else {
                self.record_unclosed_delimiter("{");
                return Err(());
            };
            match token.kind {
                GraphQLTokenKind::CurlyBraceOpen => depth += 1,
                GraphQLTokenKind::CurlyBraceClose => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                },
                GraphQLTokenKind::Eof => {
                    self.record_unclosed_delimiter("{");
                    return Err(());
                },
                GraphQLTokenKind::Error { .. } => {
                    self.handle_lexer_error(&token);
                    return Err(());
                },
                _ => {},
            }
        }

        self.pop_delimiter();
        Ok(())
    }

    /// Requires that nothing but trivia follows the parsed construct.
    fn expect_end_of_document(&mut self) -> Result<(), ()> {
        let trailing = match self.token_stream.peek() {
            None => None,
            Some(token) if matches!(token.kind, GraphQLTokenKind::Eof) => None,
            Some(token) => Some(token.clone()),
        };
        let Some(token) = trailing else {
            return Ok(());
        };

        if token.kind.is_error() {
            self.handle_lexer_error(&token);
        } else {
            let mut error = GraphQLParseError::new(
                format!(
                    "unexpected `{}` after the end of the operation",
                    Self::token_kind_display(&token.kind),
                ),
                token.span,
                GraphQLParseErrorKind::TrailingContent,
            );
            error.add_help("a document may contain exactly one operation");
            self.record_error(error);
        }
        Err(())
    }

    // =========================================================================
    // Arguments
    // =========================================================================

    /// Parses `( name: value ... )`.
    fn parse_argument_list(&mut self) -> Result<Arguments, ()> {
        let open_token = self.expect(&GraphQLTokenKind::ParenOpen)?;
        self.push_delimiter(open_token.span, DelimiterContext::FieldArguments);

        let mut arguments = Arguments::new();
        loop {
            if self.peek_is(&GraphQLTokenKind::ParenClose) {
                break;
            }
            if self.token_stream.is_at_end() {
                self.record_unclosed_delimiter("(");
                return Err(());
            }
            let (name, value) = self.parse_argument()?;
            arguments.insert(name, value);
        }

        self.expect(&GraphQLTokenKind::ParenClose)?;
        self.pop_delimiter();
        Ok(arguments)
    }

    /// Parses a bare `name: value ...` fragment, or a parenthesized one.
    fn parse_arguments_fragment(&mut self) -> Result<Arguments, ()> {
        if self.peek_is(&GraphQLTokenKind::ParenOpen) {
            return self.parse_argument_list();
        }

        let mut arguments = Arguments::new();
        while !self.token_stream.is_at_end() {
            let (name, value) = self.parse_argument()?;
            arguments.insert(name, value);
        }
        Ok(arguments)
    }

    /// Parses `name: value`.
    fn parse_argument(&mut self) -> Result<(String, ArgValue), ()> {
        let (name, _) = self.expect_name()?;
        self.expect(&GraphQLTokenKind::Colon)?;
        let value = self.parse_value()?;
        Ok((name.into_owned(), value))
    }

    // =========================================================================
    // Values
    // =========================================================================

    fn parse_value(&mut self) -> Result<ArgValue, ()> {
        self.enter_recursion()?;
        let result = self.parse_value_impl();
        self.exit_recursion();
        result
    }

    fn parse_value_impl(&mut self) -> Result<ArgValue, ()> {
        let Some(token) = self.token_stream.peek().cloned() else {
            self.record_eof(&["value"]);
            return Err(());
        };
        if self.starts_opaque_value(&token) {
            return self.parse_opaque_value();
        }

        match &token.kind {
            GraphQLTokenKind::Dollar => {
                self.consume_token();
                let (name, _) = self.expect_name()?;
                Ok(ArgValue::Variable(name.into_owned()))
            },

            GraphQLTokenKind::StringValue(_) => {
                self.consume_token();
                match token.kind.parse_string_value() {
                    Some(Ok(value)) => Ok(ArgValue::String(value)),
                    Some(Err(err)) => {
                        self.record_error(GraphQLParseError::new(
                            err.to_string(),
                            token.span,
                            GraphQLParseErrorKind::InvalidValue(ValueParsingError::String(err)),
                        ));
                        Err(())
                    },
                    None => Err(()),
                }
            },

            GraphQLTokenKind::True => {
                self.consume_token();
                Ok(ArgValue::Boolean(true))
            },
            GraphQLTokenKind::False => {
                self.consume_token();
                Ok(ArgValue::Boolean(false))
            },
            GraphQLTokenKind::Null => {
                self.consume_token();
                Ok(ArgValue::Null)
            },

            GraphQLTokenKind::IntValue(raw) | GraphQLTokenKind::FloatValue(raw) => {
                self.consume_token();
                match token.kind.parse_number_value() {
                    Some(Ok(n)) if n.is_finite() => Ok(ArgValue::Number(n)),
                    Some(_) | None => {
                        self.record_error(GraphQLParseError::new(
                            format!("number `{raw}` is out of range"),
                            token.span.clone(),
                            GraphQLParseErrorKind::InvalidValue(ValueParsingError::Number(
                                raw.to_string(),
                            )),
                        ));
                        Err(())
                    },
                }
            },

            GraphQLTokenKind::CurlyBraceOpen => self.parse_nested_literal(LiteralKind::Object),
            GraphQLTokenKind::SquareBracketOpen => self.parse_nested_literal(LiteralKind::List),

            GraphQLTokenKind::Name(name) => {
                self.consume_token();
                Ok(ArgValue::String(name.to_string()))
            },

            _ => {
                self.record_unexpected(&token, &["value"]);
                Err(())
            },
        }
    }

    /// Whether `token` begins a run of tokens that no value rule recognises,
    /// such as `deepseek-chat`, `gpt-4o` or `-`.
    fn starts_opaque_value(&mut self, token: &GraphQLToken<'src>) -> bool {
        match &token.kind {
            GraphQLTokenKind::Error { .. } => !self.is_string_error(token),
            GraphQLTokenKind::At
            | GraphQLTokenKind::Bang
            | GraphQLTokenKind::Ellipsis
            | GraphQLTokenKind::Equals => true,
            GraphQLTokenKind::Name(_)
            | GraphQLTokenKind::IntValue(_)
            | GraphQLTokenKind::FloatValue(_)
            | GraphQLTokenKind::True
            | GraphQLTokenKind::False
            | GraphQLTokenKind::Null => match self.token_stream.peek_nth(1) {
                Some(next) => {
                    next.is_adjacent_to(&token.span) && !Self::ends_opaque_value(&next.kind)
                },
                None => false,
            },
            _ => false,
        }
    }

    /// An opaque value runs up to whitespace, a comma, a comment, a delimiter
    /// or a string.
    fn ends_opaque_value(kind: &GraphQLTokenKind) -> bool {
        kind.is_open_delimiter()
            || kind.is_close_delimiter()
            || matches!(kind, GraphQLTokenKind::StringValue(_) | GraphQLTokenKind::Eof)
    }

    /// Unterminated strings stay fatal.
    fn is_string_error(&self, token: &GraphQLToken<'src>) -> bool {
        self.source
            .and_then(|source| source.get(token.span.start_inclusive.byte_offset()..))
            .is_some_and(|rest| rest.starts_with(['"', '\'']))
    }

    /// Reads a run of adjacent tokens as a single string value.
    ///
    /// Without the source text, a run holding a lexer error is reported as
    /// that error.
    fn parse_opaque_value(&mut self) -> Result<ArgValue, ()> {
        let Some(first) = self.consume_token() else {
            self.record_eof(&["value"]);
            return Err(());
        };
        let start = first.span.start_inclusive.byte_offset();
        let mut end = first.span.end_exclusive.byte_offset();
        let mut tokens = vec![first];

        loop {
            let continues = match (self.token_stream.peek(), tokens.last()) {
                (Some(next), Some(last)) => {
                    next.is_adjacent_to(&last.span) && !Self::ends_opaque_value(&next.kind)
                },
                _ => false,
            };
            if !continues {
                break;
            }
            let Some(token) = self.consume_token() else {
                break;
            };
            end = token.span.end_exclusive.byte_offset();
            tokens.push(token);
        }

        if let Some(text) = self.source.and_then(|source| source.get(start..end)) {
            return Ok(ArgValue::String(text.to_string()));
        }

        let mut text = String::new();
        for token in &tokens {
            if token.kind.is_error() {
                self.handle_lexer_error(token);
                return Err(());
            }
            text.push_str(&Self::token_kind_display(&token.kind));
        }
        Ok(ArgValue::String(text))
    }

    /// Parses an object or list literal. If the literal is malformed but
    /// properly closed, its errors are logged and an empty literal of the same
    /// kind is returned instead.
    fn parse_nested_literal(&mut self, kind: LiteralKind) -> Result<ArgValue, ()> {
        let error_checkpoint = self.errors.len();
        let delimiter_checkpoint = self.delimiter_stack.len();
        let open_span = self.peek_span();

        let result = match kind {
            LiteralKind::Object => self.parse_object_value(),
            LiteralKind::List => self.parse_list_value(),
        };
        if result.is_ok() {
            return result;
        }

        let is_fatal = self.errors[error_checkpoint..].iter().any(|error| {
            matches!(
                error.kind(),
                GraphQLParseErrorKind::UnclosedDelimiter { .. }
                    | GraphQLParseErrorKind::UnexpectedEof { .. }
                    | GraphQLParseErrorKind::NestingTooDeep
            )
        });
        if is_fatal {
            return Err(());
        }

        // Delimiters opened by this literal that are still open, including
        // its own.
        let open_count = self.delimiter_stack.len().saturating_sub(delimiter_checkpoint);
        self.skip_to_literal_close(open_count)?;
        self.delimiter_stack.truncate(delimiter_checkpoint);

        for error in self.errors.drain(error_checkpoint..) {
            tracing::debug!(
                error = %error,
                "malformed literal at {}:{}, using an empty value",
                open_span.start_inclusive.line() + 1,
                open_span.start_inclusive.col_utf8() + 1,
            );
        }

        Ok(match kind {
            LiteralKind::Object => ArgValue::Object(IndexMap::new()),
            LiteralKind::List => ArgValue::List(Vec::new()),
        })
    }

    /// Consumes tokens until `open_count` open delimiters have been closed.
    /// Reaching EOF first records an unclosed-delimiter error.
    fn skip_to_literal_close(&mut self, open_count: usize) -> Result<(), ()> {
        let mut depth = open_count;
        while depth > 0 {
            let next_kind = self.token_stream.peek().map(|t| t.kind.clone());
            match next_kind {
                None | Some(GraphQLTokenKind::Eof) => {
                    let delimiter = match self.delimiter_stack.last().map(|d| d.context) {
                        Some(DelimiterContext::ListValue) => "[",
                        Some(DelimiterContext::FieldArguments) => "(",
                        _ => "{",
                    };
                    self.record_unclosed_delimiter(delimiter);
                    return Err(());
                },
                Some(kind) if kind.is_open_delimiter() => depth += 1,
                Some(kind) if kind.is_close_delimiter() => depth -= 1,
                Some(_) => {},
            }
            self.consume_token();
        }
        Ok(())
    }

    /// Parses `{ key: value ... }`. Keys may be names or quoted strings.
    fn parse_object_value(&mut self) -> Result<ArgValue, ()> {
        let open_token = self.expect(&GraphQLTokenKind::CurlyBraceOpen)?;
        self.push_delimiter(open_token.span, DelimiterContext::ObjectValue);

        let mut fields = IndexMap::new();
        loop {
            if self.peek_is(&GraphQLTokenKind::CurlyBraceClose) {
                break;
            }
            if self.token_stream.is_at_end() {
                self.record_unclosed_delimiter("{");
                return Err(());
            }

            let key = self.parse_object_key()?;
            self.expect(&GraphQLTokenKind::Colon)?;
            let value = self.parse_value()?;
            fields.insert(key, value);
        }

        self.expect(&GraphQLTokenKind::CurlyBraceClose)?;
        self.pop_delimiter();
        Ok(ArgValue::Object(fields))
    }

    fn parse_object_key(&mut self) -> Result<String, ()> {
        let Some(token) = self.token_stream.peek().cloned() else {
            self.record_eof(&["name"]);
            return Err(());
        };
        if !matches!(token.kind, GraphQLTokenKind::StringValue(_)) {
            return Ok(self.expect_name()?.0.into_owned());
        }

        self.consume_token();
        match token.kind.parse_string_value() {
            Some(Ok(key)) => Ok(key),
            Some(Err(err)) => {
                self.record_error(GraphQLParseError::new(
                    err.to_string(),
                    token.span,
                    GraphQLParseErrorKind::InvalidValue(ValueParsingError::String(err)),
                ));
                Err(())
            },
            None => Err(()),
        }
    }

    /// Parses `[ value ... ]`.
    fn parse_list_value(&mut self) -> Result<ArgValue, ()> {
        let open_token = self.expect(&GraphQLTokenKind::SquareBracketOpen)?;
        self.push_delimiter(open_token.span, DelimiterContext::ListValue);

        let mut values = Vec::new();
        loop {
            if self.peek_is(&GraphQLTokenKind::SquareBracketClose) {
                break;
            }
            if self.token_stream.is_at_end() {
                self.record_unclosed_delimiter("[");
                return Err(());
            }
            values.push(self.parse_value()?);
        }

        self.expect(&GraphQLTokenKind::SquareBracketClose)?;
        self.pop_delimiter();
        Ok(ArgValue::List(values))
    }
}
