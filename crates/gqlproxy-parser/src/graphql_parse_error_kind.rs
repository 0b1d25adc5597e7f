use crate::ValueParsingError;

/// Categorizes parse errors for programmatic handling.
///
/// Each variant contains minimal data needed for programmatic decisions.
/// Human-readable context belongs in the `message` and `notes` fields of
/// [`GraphQLParseError`](crate::GraphQLParseError).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GraphQLParseErrorKind {
    /// Expected specific token(s) but found something else.
    ///
    /// ```text
    /// { chat(input { role: "user" }) }
    ///              ^ expected `:`, found `{`
    /// ```
    #[error("unexpected token: `{found}`")]
    UnexpectedToken {
        expected: Vec<String>,
        found: String,
    },

    /// The document ended before a complete construct was parsed.
    #[error("unexpected end of input")]
    UnexpectedEof {
        expected: Vec<String>,
    },

    /// The lexer produced an error token (unterminated string, invalid
    /// character, malformed number, ...). The lexer's message and notes are
    /// preserved on the parent error.
    #[error("lexer error")]
    LexerError,

    /// A `{`, `(` or `[` was opened but never closed.
    #[error("unclosed delimiter: `{delimiter}`")]
    UnclosedDelimiter {
        delimiter: String,
    },

    /// A literal that could not be converted to a value.
    #[error("invalid value")]
    InvalidValue(ValueParsingError),

    /// Anything other than trivia after the closing `}` of the operation.
    ///
    /// ```text
    /// { models } { models }
    ///            ^ documents may contain only one operation
    /// ```
    #[error("trailing content after operation")]
    TrailingContent,

    /// An operation body with no fields (`query { }`).
    #[error("empty selection set")]
    EmptySelectionSet,

    /// GraphQL syntax this parser deliberately does not accept (fragments,
    /// directives, field aliases).
    #[error("unsupported syntax: {construct}")]
    Unsupported {
        construct: &'static str,
    },

    /// Values, selection sets or variable definitions nested deeper than the
    /// parser's recursion limit.
    #[error("maximum nesting depth exceeded")]
    NestingTooDeep,
}
