//! Shared fixtures for executor tests.

use crate::Executor;
use crate::ResolverError;
use crate::ResolverRegistry;
use crate::resolver_fn;
use serde_json::Value;
use serde_json::json;
use std::sync::Arc;
use std::sync::Mutex;

/// Arguments received by the `echo` resolvers, in call order.
pub type CallLog = Arc<Mutex<Vec<(String, serde_json::Map<String, Value>)>>>;

/// An executor with:
/// - `Query.hello` → `"world"`
/// - `Query.echo` → its arguments as an object
/// - `Mutation.chat` → records its arguments and returns `{"id": "chat-1"}`
/// - `Mutation.fail` → an upstream error
pub fn test_executor() -> (Executor, CallLog) {
    let calls: CallLog = Arc::default();

    let chat_calls = calls.clone();
    let registry = ResolverRegistry::builder()
        .query("hello", resolver_fn(|_args| async { Ok(json!("world")) }))
        .query("echo", resolver_fn(|args| async move { Ok(Value::Object(args)) }))
        .mutation(
            "chat",
            resolver_fn(move |args| {
                let calls = chat_calls.clone();
                async move {
                    if let Ok(mut calls) = calls.lock() {
                        calls.push(("chat".to_string(), args));
                    }
                    Ok(json!({"id": "chat-1"}))
                }
            }),
        )
        .mutation(
            "fail",
            resolver_fn(|_args| async {
                Err(ResolverError::Upstream {
                    status: 401,
                    body: "{\"error\":\"bad key\"}".to_string(),
                })
            }),
        )
        .build();

    (Executor::new(Arc::new(registry)), calls)
}
