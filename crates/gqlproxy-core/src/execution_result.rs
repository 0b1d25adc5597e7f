//! The response envelope returned by the GraphQL endpoints.

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// Machine-readable error category carried in `extensions.code`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Any failure while executing an operation.
    InternalError,
    /// The HTTP request itself is malformed.
    BadRequest,
    /// No route matches the request path.
    NotFound,
    /// The proxy has no upstream API key.
    ConfigurationError,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ErrorExtensions {
    pub code: ErrorCode,
}

/// A single error in the `errors` array.
///
/// `locations` and `path` are always present and empty: errors abort the whole
/// operation, so they never point at a particular field.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default)]
    pub locations: Vec<Value>,
    #[serde(default)]
    pub path: Vec<Value>,
    pub extensions: ErrorExtensions,
}

impl GraphQLError {
    pub fn new(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: Vec::new(),
            extensions: ErrorExtensions { code },
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.extensions.code
    }
}

/// Either `{"data": {...}}` or `{"errors": [...]}`, never both.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionResult {
    Data(IndexMap<String, Value>),
    Errors(Vec<GraphQLError>),
}

impl ExecutionResult {
    /// An envelope holding a single error.
    pub fn error(message: impl Into<String>, code: ErrorCode) -> Self {
        ExecutionResult::Errors(vec![GraphQLError::new(message, code)])
    }

    pub fn data(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            ExecutionResult::Data(data) => Some(data),
            ExecutionResult::Errors(_) => None,
        }
    }

    pub fn errors(&self) -> &[GraphQLError] {
        match self {
            ExecutionResult::Data(_) => &[],
            ExecutionResult::Errors(errors) => errors,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ExecutionResult::Data(_))
    }
}
