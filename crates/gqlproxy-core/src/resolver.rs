//! The resolver trait and the immutable registry the executor dispatches
//! through.

use async_trait::async_trait;
use gqlproxy_parser::ast::OperationType;
use indexmap::IndexMap;
use serde_json::Map;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Errors a resolver can fail with.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ResolverError {
    /// The field's arguments are missing or have the wrong shape.
    #[error("{0}")]
    BadInput(String),

    /// The proxy is not configured to reach the upstream API.
    #[error("{0}")]
    Configuration(String),

    /// The upstream API answered with a non-success status.
    #[error("Upstream API error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// The upstream API could not be reached.
    #[error("Upstream request failed: {0}")]
    Transport(String),

    /// The upstream API answered with a body that is not the expected JSON.
    #[error("Invalid upstream response: {0}")]
    Decode(String),
}

/// Resolves one top-level field from its JSON arguments.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, args: Map<String, Value>) -> Result<Value, ResolverError>;
}

/// Adapts an async closure into a [`Resolver`].
pub struct FnResolver<F>(F);

#[async_trait]
impl<F, Fut> Resolver for FnResolver<F>
where
    F: Fn(Map<String, Value>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, ResolverError>> + Send,
{
    async fn resolve(&self, args: Map<String, Value>) -> Result<Value, ResolverError> {
        (self.0)(args).await
    }
}

/// Wraps an async closure as a shareable resolver.
///
/// ```
/// use gqlproxy_core::resolver_fn;
/// use serde_json::json;
///
/// let hello = resolver_fn(|_args| async { Ok(json!("world")) });
/// # let _ = hello;
/// ```
pub fn resolver_fn<F, Fut>(f: F) -> Arc<dyn Resolver>
where
    F: Fn(Map<String, Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, ResolverError>> + Send + 'static,
{
    Arc::new(FnResolver(f))
}

/// Name → resolver tables for the `Query` and `Mutation` root types.
///
/// Built once with [`ResolverRegistry::builder`] and shared read-only.
/// Subscriptions are not dispatched through the registry.
#[derive(Clone, Default)]
pub struct ResolverRegistry {
    query: IndexMap<String, Arc<dyn Resolver>>,
    mutation: IndexMap<String, Arc<dyn Resolver>>,
}

impl ResolverRegistry {
    pub fn builder() -> ResolverRegistryBuilder {
        ResolverRegistryBuilder::default()
    }

    pub fn lookup(&self, operation_type: OperationType, name: &str) -> Option<&Arc<dyn Resolver>> {
        match operation_type {
            OperationType::Query => self.query.get(name),
            OperationType::Mutation => self.mutation.get(name),
            OperationType::Subscription => None,
        }
    }

    /// Registered field names for `operation_type`, in registration order.
    pub fn field_names(&self, operation_type: OperationType) -> Vec<&str> {
        let table = match operation_type {
            OperationType::Query => &self.query,
            OperationType::Mutation => &self.mutation,
            OperationType::Subscription => return vec![],
        };
        table.keys().map(String::as_str).collect()
    }
}

impl fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("query", &self.query.keys().collect::<Vec<_>>())
            .field("mutation", &self.mutation.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[derive(Default)]
pub struct ResolverRegistryBuilder {
    registry: ResolverRegistry,
}

impl ResolverRegistryBuilder {
    /// Registers a `Query` field. Registering a name twice replaces the
    /// earlier resolver.
    pub fn query(mut self, name: impl Into<String>, resolver: Arc<dyn Resolver>) -> Self {
        self.registry.query.insert(name.into(), resolver);
        self
    }

    /// Registers a `Mutation` field. Registering a name twice replaces the
    /// earlier resolver.
    pub fn mutation(mut self, name: impl Into<String>, resolver: Arc<dyn Resolver>) -> Self {
        self.registry.mutation.insert(name.into(), resolver);
        self
    }

    pub fn build(self) -> ResolverRegistry {
        self.registry
    }
}
