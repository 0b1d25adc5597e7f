//! A canned [`UpstreamApi`] for resolver tests.

use crate::upstream::ByteStream;
use crate::upstream::UpstreamApi;
use crate::upstream::UpstreamError;
use async_trait::async_trait;
use futures::StreamExt;
use serde_json::Value;
use serde_json::json;
use std::sync::Mutex;

/// One recorded upstream call: method, path and body (if any).
pub type RecordedCall = (&'static str, String, Option<Value>);

#[derive(Default)]
pub struct MockUpstream {
    pub calls: Mutex<Vec<RecordedCall>>,
    /// When set, every call fails with this status and body.
    pub failure: Option<(u16, String)>,
}

impl MockUpstream {
    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            calls: Mutex::default(),
            failure: Some((status, body.to_string())),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn record(&self, method: &'static str, path: &str, body: Option<&Value>) -> Result<(), UpstreamError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((method, path.to_string(), body.cloned()));
        }
        match &self.failure {
            Some((status, body)) => Err(UpstreamError::Status {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UpstreamApi for MockUpstream {
    async fn get_json(&self, path: &str) -> Result<Value, UpstreamError> {
        self.record("GET", path, None)?;
        Ok(json!({"object": "list", "data": [{"id": "deepseek-chat", "object": "model"}]}))
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, UpstreamError> {
        self.record("POST", path, Some(body))?;
        Ok(json!({"id": "cmpl-1", "model": body["model"].clone()}))
    }

    async fn post_stream(&self, path: &str, body: &Value) -> Result<ByteStream, UpstreamError> {
        self.record("POST", path, Some(body))?;
        Ok(futures::stream::empty().boxed())
    }
}
