//! Executes parsed operations against a table of async resolvers.
//!
//! The flow for one request is parse → for each top-level field { resolve
//! variables → dispatch to the field's resolver → collect the result } →
//! assemble the `data` map. Any failure aborts the operation with a
//! single-error envelope.

mod execution_error;
mod execution_result;
mod executor;
mod graphql_request;
mod resolver;
pub mod variables;

pub use execution_error::ExecutionError;
pub use execution_result::ErrorCode;
pub use execution_result::ErrorExtensions;
pub use execution_result::ExecutionResult;
pub use execution_result::GraphQLError;
pub use executor::Executor;
pub use executor::prepare_operation;
pub use graphql_request::GraphQLRequest;
pub use graphql_request::Variables;
pub use resolver::FnResolver;
pub use resolver::Resolver;
pub use resolver::ResolverError;
pub use resolver::ResolverRegistry;
pub use resolver::ResolverRegistryBuilder;
pub use resolver::resolver_fn;
pub use variables::VariableError;

#[cfg(test)]
mod tests;
