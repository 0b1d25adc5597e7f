//! Client for the OpenAI-compatible upstream API.
//!
//! Resolvers and the streaming relay talk to the upstream through the
//! [`UpstreamApi`] trait so tests can substitute a canned implementation.

use crate::config::ProxyConfig;
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use gqlproxy_core::ResolverError;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;
use tracing::error;

/// Raw body chunks of a streaming upstream response.
pub type ByteStream = BoxStream<'static, Result<Bytes, UpstreamError>>;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("API Key not configured")]
    MissingApiKey,

    #[error("Upstream API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid upstream response: {0}")]
    Decode(String),
}

impl From<UpstreamError> for ResolverError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::MissingApiKey => ResolverError::Configuration(err.to_string()),
            UpstreamError::Status { status, body } => ResolverError::Upstream { status, body },
            UpstreamError::Transport(source) => ResolverError::Transport(source.to_string()),
            UpstreamError::Decode(message) => ResolverError::Decode(message),
        }
    }
}

/// The upstream operations the proxy needs. `path` is relative to the
/// configured base URL and starts with `/`.
#[async_trait]
pub trait UpstreamApi: Send + Sync {
    async fn get_json(&self, path: &str) -> Result<Value, UpstreamError>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, UpstreamError>;

    /// Sends `body` and returns the raw response body as it arrives.
    async fn post_stream(&self, path: &str, body: &Value) -> Result<ByteStream, UpstreamError>;
}

/// [`UpstreamApi`] over HTTP with a bearer token.
#[derive(Clone, Debug)]
pub struct DeepSeekClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl DeepSeekClient {
    pub fn new(config: &ProxyConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: config.upstream_base_url_trimmed().to_string(),
            api_key: config.api_key().map(str::to_string),
        })
    }

    fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder, UpstreamError> {
        let api_key = self.api_key.as_deref().ok_or(UpstreamError::MissingApiKey)?;
        let url = format!("{}{path}", self.base_url);
        debug!(%method, %url, "upstream request");
        Ok(self.client.request(method, url).bearer_auth(api_key))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, UpstreamError> {
        let response = request.send().await.inspect_err(|err| {
            error!(error = %err, "upstream request failed");
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, body = %body, "upstream error");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, UpstreamError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| {
            error!(error = %err, "failed to decode upstream response");
            UpstreamError::Decode(err.to_string())
        })
    }
}

#[async_trait]
impl UpstreamApi for DeepSeekClient {
    async fn get_json(&self, path: &str) -> Result<Value, UpstreamError> {
        let response = self.send(self.request(Method::GET, path)?).await?;
        Self::read_json(response).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, UpstreamError> {
        let response = self.send(self.request(Method::POST, path)?.json(body)).await?;
        Self::read_json(response).await
    }

    async fn post_stream(&self, path: &str, body: &Value) -> Result<ByteStream, UpstreamError> {
        let request = self
            .request(Method::POST, path)?
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .json(body);
        let response = self.send(request).await?;
        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(UpstreamError::from))
            .boxed())
    }
}
