//! The built-in `Query` and `Mutation` fields backed by the upstream API.
//!
//! | Table    | Field        | Upstream call            |
//! |----------|--------------|--------------------------|
//! | Query    | `models`     | `GET /models`            |
//! | Query    | `info`       | none                     |
//! | Mutation | `chat`       | `POST /chat/completions` |
//! | Mutation | `completion` | `POST /completions`      |

use crate::upstream::UpstreamApi;
use async_trait::async_trait;
use gqlproxy_core::Resolver;
use gqlproxy_core::ResolverError;
use gqlproxy_core::ResolverRegistry;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use std::sync::Arc;

pub const API_NAME: &str = "DeepSeek GraphQL Proxy";

const DEFAULT_MAX_TOKENS: u64 = 1000;
const DEFAULT_TEMPERATURE: f64 = 0.7;
const DEFAULT_TOP_P: u64 = 1;

/// The static description served by `Query.info`, `GET /` and `GET /api`.
pub fn api_info() -> Value {
    json!({
        "name": API_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "graphql": "POST /graphql",
            "graphqlStream": "POST /graphql/stream",
            "models": "GET /api/models",
            "chat": "POST /api/chat",
            "completions": "POST /api/completions"
        }
    })
}

/// Which upstream generation endpoint a request targets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompletionKind {
    Chat,
    Completion,
}

impl CompletionKind {
    pub fn path(self) -> &'static str {
        match self {
            CompletionKind::Chat => "/chat/completions",
            CompletionKind::Completion => "/completions",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            CompletionKind::Chat => "deepseek-chat",
            CompletionKind::Completion => "deepseek-coder",
        }
    }

    /// Checks the one argument each endpoint cannot do without.
    pub fn validate(self, input: &Map<String, Value>) -> Result<(), ResolverError> {
        match self {
            CompletionKind::Chat => match input.get("messages") {
                Some(Value::Array(_)) => Ok(()),
                _ => Err(ResolverError::BadInput(
                    "messages field is required and must be an array".to_string(),
                )),
            },
            CompletionKind::Completion => match input.get("prompt") {
                None | Some(Value::Null) => Err(prompt_required()),
                Some(Value::String(prompt)) if prompt.is_empty() => Err(prompt_required()),
                Some(_) => Ok(()),
            },
        }
    }
}

fn prompt_required() -> ResolverError {
    ResolverError::BadInput("prompt field is required".to_string())
}

/// Collects a generation request from a field's arguments.
///
/// The keys of an `input` object argument are merged with any other
/// arguments; direct arguments win over keys of `input`.
pub fn completion_input(mut args: Map<String, Value>) -> Result<Map<String, Value>, ResolverError> {
    let mut input = match args.remove("input") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(input)) => input,
        Some(_) => {
            return Err(ResolverError::BadInput(
                "input argument must be an object".to_string(),
            ));
        },
    };
    input.extend(args);
    Ok(input)
}

/// Builds the upstream request body: defaults first, then the caller's
/// values, then `stream` forced to the endpoint's mode.
///
/// `null` values leave the default in place.
pub fn build_upstream_body(
    kind: CompletionKind,
    input: Map<String, Value>,
    stream: bool,
) -> Result<Value, ResolverError> {
    kind.validate(&input)?;

    let mut body = Map::new();
    body.insert("model".to_string(), json!(kind.default_model()));
    body.insert("max_tokens".to_string(), json!(DEFAULT_MAX_TOKENS));
    body.insert("temperature".to_string(), json!(DEFAULT_TEMPERATURE));
    body.insert("top_p".to_string(), json!(DEFAULT_TOP_P));
    for (key, value) in input {
        if value.is_null() && body.contains_key(&key) {
            continue;
        }
        body.insert(key, value);
    }
    body.insert("stream".to_string(), Value::Bool(stream));
    Ok(Value::Object(body))
}

/// `Query.models`
pub struct ModelsResolver {
    upstream: Arc<dyn UpstreamApi>,
}

impl ModelsResolver {
    pub fn new(upstream: Arc<dyn UpstreamApi>) -> Self {
        Self { upstream }
    }
}

#[async_trait]
impl Resolver for ModelsResolver {
    async fn resolve(&self, _args: Map<String, Value>) -> Result<Value, ResolverError> {
        Ok(self.upstream.get_json("/models").await?)
    }
}

/// `Query.info`
pub struct InfoResolver;

#[async_trait]
impl Resolver for InfoResolver {
    async fn resolve(&self, _args: Map<String, Value>) -> Result<Value, ResolverError> {
        Ok(api_info())
    }
}

/// `Mutation.chat` and `Mutation.completion`.
pub struct CompletionResolver {
    kind: CompletionKind,
    upstream: Arc<dyn UpstreamApi>,
}

impl CompletionResolver {
    pub fn new(kind: CompletionKind, upstream: Arc<dyn UpstreamApi>) -> Self {
        Self { kind, upstream }
    }
}

#[async_trait]
impl Resolver for CompletionResolver {
    async fn resolve(&self, args: Map<String, Value>) -> Result<Value, ResolverError> {
        let body = build_upstream_body(self.kind, completion_input(args)?, false)?;
        Ok(self.upstream.post_json(self.kind.path(), &body).await?)
    }
}

/// The registry served by `POST /graphql`.
pub fn build_registry(upstream: Arc<dyn UpstreamApi>) -> ResolverRegistry {
    ResolverRegistry::builder()
        .query("models", Arc::new(ModelsResolver::new(upstream.clone())))
        .query("info", Arc::new(InfoResolver))
        .mutation(
            "chat",
            Arc::new(CompletionResolver::new(CompletionKind::Chat, upstream.clone())),
        )
        .mutation(
            "completion",
            Arc::new(CompletionResolver::new(CompletionKind::Completion, upstream)),
        )
        .build()
}
