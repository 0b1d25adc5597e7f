/// Why a string literal could not be cooked into its value.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GraphQLStringParsingError {
    /// A backslash followed by a character with no escape meaning, e.g. `\q`.
    #[error("invalid escape sequence `{0}`")]
    InvalidEscapeSequence(String),

    #[error("string literal is missing its closing quote")]
    UnterminatedString,

    /// A `\u` escape that is malformed or names no Unicode scalar value.
    #[error("invalid unicode escape `{0}`")]
    InvalidUnicodeEscape(String),
}
