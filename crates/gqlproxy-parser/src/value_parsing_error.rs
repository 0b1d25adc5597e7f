use crate::GraphQLStringParsingError;

/// Error produced when a literal token cannot be converted into an
/// [`ArgValue`](crate::ast::ArgValue).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ValueParsingError {
    /// A numeric literal that does not parse to a finite `f64`.
    #[error("invalid number `{0}`")]
    Number(String),

    #[error("invalid string: {0}")]
    String(GraphQLStringParsingError),
}
