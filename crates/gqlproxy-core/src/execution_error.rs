use crate::ErrorCode;
use crate::GraphQLError;
use crate::ResolverError;
use crate::VariableError;
use gqlproxy_parser::GraphQLParseError;
use gqlproxy_parser::ast::OperationType;

/// Everything that can abort the execution of an operation.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("Syntax error: {0}")]
    Syntax(#[from] GraphQLParseError),

    #[error("Unknown operation named \"{0}\"")]
    UnknownOperationName(String),

    #[error("Subscriptions are only supported on the streaming endpoint")]
    SubscriptionNotSupported,

    #[error("The streaming endpoint only accepts subscription operations, got a {0}")]
    NotASubscription(OperationType),

    #[error("A subscription must select exactly one field, got {0}")]
    SubscriptionFieldCount(usize),

    #[error("Cannot query field \"{name}\" on type \"{}\"", .operation_type.root_type_name())]
    UnknownField {
        operation_type: OperationType,
        name: String,
    },

    #[error(transparent)]
    Variable(#[from] VariableError),

    #[error("{source}")]
    Resolver {
        field: String,
        #[source]
        source: ResolverError,
    },
}

impl ExecutionError {
    /// Every execution failure is reported as `INTERNAL_ERROR`.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::InternalError
    }

    pub fn to_graphql_error(&self) -> GraphQLError {
        GraphQLError::new(self.to_string(), self.code())
    }
}
