//! Server-Sent Events relay for `POST /graphql/stream`.
//!
//! A streaming request is a `subscription` selecting exactly one of
//! `chatStream` or `completionStream`. The upstream answers with
//! OpenAI-style SSE (`data: {json}` frames and a terminal `data: [DONE]`);
//! each upstream chunk is re-emitted as
//!
//! ```text
//! event: data
//! data: {...}
//!
//! ```
//!
//! followed by a single `complete` event, or by a single `error` event if
//! anything fails along the way.

use crate::resolvers::CompletionKind;
use crate::resolvers::build_upstream_body;
use crate::resolvers::completion_input;
use crate::upstream::ByteStream;
use crate::upstream::UpstreamApi;
use async_stream::stream;
use bytes::Bytes;
use futures::Stream;
use futures::StreamExt;
use futures::stream::BoxStream;
use gqlproxy_core::ErrorCode;
use gqlproxy_core::ExecutionError;
use gqlproxy_core::GraphQLRequest;
use gqlproxy_core::ResolverError;
use gqlproxy_core::Variables;
use gqlproxy_core::prepare_operation;
use gqlproxy_core::variables::resolve_arguments;
use gqlproxy_parser::ast::OperationType;
use serde_json::Value;
use serde_json::json;
use tracing::debug;
use tracing::error;

/// A validated streaming request, ready to send upstream.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamRequest {
    pub field: String,
    pub kind: CompletionKind,
    pub body: Value,
}

fn stream_field_kind(name: &str) -> Option<CompletionKind> {
    match name {
        "chatStream" => Some(CompletionKind::Chat),
        "completionStream" => Some(CompletionKind::Completion),
        _ => None,
    }
}

/// Parses a streaming request and builds its upstream body.
pub fn prepare_stream_request(request: &GraphQLRequest) -> Result<StreamRequest, ExecutionError> {
    let operation = prepare_operation(request)?;
    if operation.operation_type != OperationType::Subscription {
        return Err(ExecutionError::NotASubscription(operation.operation_type));
    }
    let [field] = operation.fields.as_slice() else {
        return Err(ExecutionError::SubscriptionFieldCount(operation.fields.len()));
    };
    let kind = stream_field_kind(&field.name).ok_or_else(|| ExecutionError::UnknownField {
        operation_type: OperationType::Subscription,
        name: field.name.clone(),
    })?;

    let no_variables = Variables::new();
    let variables = request.variables.as_ref().unwrap_or(&no_variables);
    let args = resolve_arguments(&field.arguments, variables)?;

    let body = completion_input(args)
        .and_then(|input| build_upstream_body(kind, input, true))
        .map_err(|source| ExecutionError::Resolver {
            field: field.name.clone(),
            source,
        })?;

    Ok(StreamRequest {
        field: field.name.clone(),
        kind,
        body,
    })
}

pub fn sse_frame(event: &str, data: &Value) -> Bytes {
    Bytes::from(format!("event: {event}\ndata: {data}\n\n"))
}

pub fn error_frame(message: &str, code: ErrorCode) -> Bytes {
    sse_frame("error", &json!({"message": message, "code": code}))
}

pub fn complete_frame() -> Bytes {
    sse_frame("complete", &json!({"type": "complete"}))
}

/// A stream holding a single `error` event.
pub fn error_event(message: &str, code: ErrorCode) -> BoxStream<'static, Bytes> {
    futures::stream::once(futures::future::ready(error_frame(message, code))).boxed()
}

/// Handles one streaming request end to end, never failing: problems are
/// reported in-band as an `error` event.
pub async fn open_event_stream(
    upstream: &dyn UpstreamApi,
    request: &GraphQLRequest,
) -> BoxStream<'static, Bytes> {
    let prepared = match prepare_stream_request(request) {
        Ok(prepared) => prepared,
        Err(err) => {
            debug!(error = %err, "rejected streaming request");
            return error_event(&err.to_string(), err.code());
        },
    };

    debug!(field = %prepared.field, path = prepared.kind.path(), "opening upstream stream");
    match upstream.post_stream(prepared.kind.path(), &prepared.body).await {
        Ok(chunks) => relay_upstream_events(chunks).boxed(),
        Err(err) => {
            let err = ResolverError::from(err);
            error!(error = %err, "upstream stream failed to open");
            error_event(&err.to_string(), ErrorCode::InternalError)
        },
    }
}

/// What one upstream SSE frame amounts to.
#[derive(Debug, PartialEq)]
enum UpstreamFrame {
    Chunk(Value),
    Done,
    Skip,
}

fn parse_upstream_frame(frame: &[u8]) -> Result<UpstreamFrame, serde_json::Error> {
    let frame = String::from_utf8_lossy(frame);
    let data = frame
        .split(['\r', '\n'])
        .filter_map(|line| line.strip_prefix("data:"))
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");

    if data.is_empty() {
        return Ok(UpstreamFrame::Skip);
    }
    if data == "[DONE]" {
        return Ok(UpstreamFrame::Done);
    }
    serde_json::from_str(&data).map(UpstreamFrame::Chunk)
}

/// Splits the first complete frame (terminated by a blank line) off the
/// front of `buffer`. Lines may end in `\n`, `\r\n` or `\r`.
fn take_frame(buffer: &mut Vec<u8>) -> Option<Vec<u8>> {
    let end = frame_end(buffer)?;
    let rest = buffer.split_off(end);
    Some(std::mem::replace(buffer, rest))
}

/// Offset just past the blank line that ends the first frame.
fn frame_end(buffer: &[u8]) -> Option<usize> {
    let mut from = 0;
    while let Some(offset) = memchr::memchr2(b'\n', b'\r', &buffer[from..]) {
        let line_end = from + offset;
        let next_line = line_end + line_break_len(buffer, line_end)?;
        match buffer.get(next_line) {
            Some(b'\n' | b'\r') => return Some(next_line + line_break_len(buffer, next_line)?),
            Some(_) => from = next_line,
            None => return None,
        }
    }
    None
}

/// Length of the line break at `at`. `None` while a trailing `\r` may still
/// be followed by `\n` in the next read.
fn line_break_len(buffer: &[u8], at: usize) -> Option<usize> {
    match (buffer.get(at), buffer.get(at + 1)) {
        (Some(b'\r'), Some(b'\n')) => Some(2),
        (Some(b'\r'), None) => None,
        _ => Some(1),
    }
}

/// Re-emits an upstream SSE body as `data` events followed by `complete`.
///
/// A transport error or an undecodable chunk ends the stream with an
/// `error` event instead.
pub fn relay_upstream_events(upstream: ByteStream) -> impl Stream<Item = Bytes> + Send + 'static {
    stream! {
        let mut upstream = upstream;
        let mut buffer: Vec<u8> = Vec::new();
        let mut finished = false;

        'read: while let Some(chunk) = upstream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(err) => {
                    let err = ResolverError::from(err);
                    error!(error = %err, "upstream stream failed");
                    yield error_frame(&err.to_string(), ErrorCode::InternalError);
                    return;
                },
            };
            buffer.extend_from_slice(&chunk);

            while let Some(frame) = take_frame(&mut buffer) {
                match parse_upstream_frame(&frame) {
                    Ok(UpstreamFrame::Chunk(value)) => {
                        yield sse_frame("data", &value);
                    },
                    Ok(UpstreamFrame::Skip) => {},
                    Ok(UpstreamFrame::Done) => {
                        finished = true;
                        break 'read;
                    },
                    Err(err) => {
                        error!(error = %err, "undecodable upstream stream chunk");
                        let err = ResolverError::Decode(err.to_string());
                        yield error_frame(&err.to_string(), ErrorCode::InternalError);
                        return;
                    },
                }
            }
        }

        // The upstream may close without a trailing blank line.
        if !finished && !buffer.is_empty() {
            match parse_upstream_frame(&buffer) {
                Ok(UpstreamFrame::Chunk(value)) => {
                    yield sse_frame("data", &value);
                },
                Ok(UpstreamFrame::Done | UpstreamFrame::Skip) => {},
                Err(err) => {
                    let err = ResolverError::Decode(err.to_string());
                    yield error_frame(&err.to_string(), ErrorCode::InternalError);
                    return;
                },
            }
        }

        yield complete_frame();
    }
}
