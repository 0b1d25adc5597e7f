//! Parses and runs one operation against a [`ResolverRegistry`].

use crate::ExecutionError;
use crate::ExecutionResult;
use crate::GraphQLRequest;
use crate::ResolverRegistry;
use crate::Variables;
use crate::variables::resolve_arguments;
use gqlproxy_parser::ast::OperationType;
use gqlproxy_parser::ast::ParsedOperation;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::Instrument;

/// Parses the request's query and checks it against the requested
/// `operationName`.
///
/// An empty `operationName` is treated as absent.
pub fn prepare_operation(request: &GraphQLRequest) -> Result<ParsedOperation, ExecutionError> {
    let operation = gqlproxy_parser::parse_query(&request.query)?;

    if let Some(requested) = request.operation_name.as_deref().filter(|name| !name.is_empty())
        && operation.operation_name.as_deref() != Some(requested)
    {
        return Err(ExecutionError::UnknownOperationName(requested.to_string()));
    }
    Ok(operation)
}

/// Executes `query` and `mutation` operations.
///
/// Fields run sequentially in source order. The first failure aborts the
/// operation and produces a single-error envelope; there is no partial data.
#[derive(Clone, Debug)]
pub struct Executor {
    registry: Arc<ResolverRegistry>,
}

impl Executor {
    pub fn new(registry: Arc<ResolverRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ResolverRegistry {
        &self.registry
    }

    /// Executes a request and renders the outcome as a response envelope.
    pub async fn execute(&self, request: &GraphQLRequest) -> ExecutionResult {
        match self.try_execute(request).await {
            Ok(data) => ExecutionResult::Data(data),
            Err(err) => {
                tracing::debug!(error = %err, "operation failed");
                ExecutionResult::Errors(vec![err.to_graphql_error()])
            },
        }
    }

    /// Executes a request, returning the `data` map or the first error.
    pub async fn try_execute(
        &self,
        request: &GraphQLRequest,
    ) -> Result<IndexMap<String, Value>, ExecutionError> {
        let operation = prepare_operation(request)?;
        let no_variables = Variables::new();
        let variables = request.variables.as_ref().unwrap_or(&no_variables);

        let span = tracing::info_span!(
            "execute",
            operation_type = %operation.operation_type,
            operation_name = operation.operation_name.as_deref().unwrap_or("<anonymous>")
        );
        self.execute_operation(&operation, variables)
            .instrument(span)
            .await
    }

    async fn execute_operation(
        &self,
        operation: &ParsedOperation,
        variables: &Variables,
    ) -> Result<IndexMap<String, Value>, ExecutionError> {
        if operation.operation_type == OperationType::Subscription {
            return Err(ExecutionError::SubscriptionNotSupported);
        }

        let mut data = IndexMap::with_capacity(operation.fields.len());
        for field in &operation.fields {
            let resolver = self
                .registry
                .lookup(operation.operation_type, &field.name)
                .ok_or_else(|| ExecutionError::UnknownField {
                    operation_type: operation.operation_type,
                    name: field.name.clone(),
                })?;
            let args = resolve_arguments(&field.arguments, variables)?;

            tracing::debug!(field = %field.name, arg_count = args.len(), "resolving field");
            let value = resolver
                .resolve(args)
                .await
                .map_err(|source| ExecutionError::Resolver {
                    field: field.name.clone(),
                    source,
                })?;
            data.insert(field.name.clone(), value);
        }
        Ok(data)
    }
}
