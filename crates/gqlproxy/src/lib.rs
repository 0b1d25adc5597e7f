//! An HTTP proxy in front of a DeepSeek-compatible LLM API.
//!
//! Clients talk to the proxy through a small GraphQL-style interface:
//! `query { models }`, `mutation { chat(input: {...}) }` and, over Server-Sent
//! Events, `subscription { chatStream(...) }`. Operations are parsed by
//! `gqlproxy-parser`, dispatched by `gqlproxy-core`'s executor to the
//! resolvers in [`resolvers`], and forwarded upstream by [`upstream`].
//! The plain REST routes (`/api/models`, `/api/chat`, `/api/completions`)
//! are served alongside.

pub mod config;
pub mod resolvers;
pub mod server;
pub mod streaming;
pub mod upstream;

pub use config::ProxyConfig;
pub use server::AppState;
pub use server::app;
pub use server::serve;
pub use upstream::DeepSeekClient;
pub use upstream::UpstreamApi;
pub use upstream::UpstreamError;

#[cfg(test)]
mod tests;
