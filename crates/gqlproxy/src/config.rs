//! Runtime configuration for the proxy.
//!
//! Values come from the `serve` command's flags, each of which falls back to
//! an environment variable:
//!
//! - `HOST`: interface to bind (default: `0.0.0.0`)
//! - `PORT`: port to bind (default: `8787`)
//! - `UPSTREAM_BASE_URL`: base URL of the OpenAI-compatible upstream
//!   (default: `https://api.deepseek.com/v1`)
//! - `DEEPSEEK_API_KEY`: bearer token sent upstream (no default)
//! - `REQUEST_TIMEOUT_SECS`: upstream request timeout (default: `120`)

use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8787;
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.deepseek.com/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Clone, Debug, PartialEq)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    pub upstream_base_url: String,
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            api_key: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ProxyConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn upstream_base_url_trimmed(&self) -> &str {
        self.upstream_base_url.trim_end_matches('/')
    }

    /// The configured API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
