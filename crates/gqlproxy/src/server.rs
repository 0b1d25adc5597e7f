//! Actix Web HTTP server.
//!
//! Routes:
//! - `POST /graphql`: execute a `query` or `mutation`
//! - `POST /graphql/stream`: relay a `subscription` as Server-Sent Events
//! - `GET /`, `GET /api`: API description
//! - `GET /api/models`, `POST /api/chat`, `POST /api/completions`: plain
//!   JSON passthrough to the upstream with default parameters injected
//!
//! Every route answers `500 CONFIGURATION_ERROR` while no API key is
//! configured. Unknown routes answer `404 NOT_FOUND`.

use crate::config::ProxyConfig;
use crate::resolvers;
use crate::resolvers::CompletionKind;
use crate::streaming;
use crate::upstream::DeepSeekClient;
use crate::upstream::UpstreamApi;
use crate::upstream::UpstreamError;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::body::BoxBody;
use actix_web::body::MessageBody;
use actix_web::dev::Service;
use actix_web::dev::ServiceFactory;
use actix_web::dev::ServiceRequest;
use actix_web::dev::ServiceResponse;
use actix_web::error::InternalError;
use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::web;
use anyhow::Context;
use futures::FutureExt;
use futures::StreamExt;
use futures::future::Either;
use gqlproxy_core::ErrorCode;
use gqlproxy_core::ExecutionResult;
use gqlproxy_core::Executor;
use gqlproxy_core::GraphQLRequest;
use gqlproxy_core::ResolverError;
use serde_json::Map;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

/// Shared, read-only state handed to every handler.
pub struct AppState {
    pub config: ProxyConfig,
    pub executor: Executor,
    pub upstream: Arc<dyn UpstreamApi>,
}

impl AppState {
    /// Builds the resolver registry over `upstream` and wraps it in an
    /// executor.
    pub fn new(config: ProxyConfig, upstream: Arc<dyn UpstreamApi>) -> Self {
        let registry = resolvers::build_registry(upstream.clone());
        Self {
            config,
            executor: Executor::new(Arc::new(registry)),
            upstream,
        }
    }
}

/// An error envelope with the given HTTP status.
pub fn error_response(status: StatusCode, message: impl Into<String>, code: ErrorCode) -> HttpResponse {
    HttpResponse::build(status).json(ExecutionResult::error(message, code))
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    let response = error_response(
        StatusCode::BAD_REQUEST,
        format!("Invalid request body: {err}"),
        ErrorCode::BadRequest,
    );
    InternalError::from_response(err, response).into()
}

fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(86400)
}

/// Builds the application with its routes, CORS and the API key check.
pub fn app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let has_api_key = state.config.has_api_key();

    App::new()
        .app_data(state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap_fn(move |req, srv| {
            if has_api_key {
                Either::Left(
                    srv.call(req)
                        .map(|res| res.map(ServiceResponse::map_into_left_body::<BoxBody>)),
                )
            } else {
                let response = error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "API Key not configured",
                    ErrorCode::ConfigurationError,
                );
                Either::Right(futures::future::ready(Ok(
                    req.into_response(response).map_into_right_body()
                )))
            }
        })
        .wrap(cors())
        .route("/", web::get().to(handle_info))
        .route("/api", web::get().to(handle_info))
        .route("/graphql", web::post().to(handle_graphql))
        .route("/graphql/stream", web::post().to(handle_graphql_stream))
        .route("/api/models", web::get().to(handle_models))
        .route("/api/chat", web::post().to(handle_chat))
        .route("/api/completions", web::post().to(handle_completions))
        .default_service(web::to(handle_not_found))
}

pub async fn serve(config: ProxyConfig) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    if !config.has_api_key() {
        warn!("no upstream API key configured, every request will fail with CONFIGURATION_ERROR");
    }

    let upstream = DeepSeekClient::new(&config).context("failed to build upstream HTTP client")?;
    let upstream_base_url = config.upstream_base_url_trimmed().to_string();
    let state = web::Data::new(AppState::new(config, Arc::new(upstream)));

    info!(addr = %addr, upstream = %upstream_base_url, "gqlproxy listening");
    HttpServer::new(move || app(state.clone()))
        .bind(&addr)
        .with_context(|| format!("failed to bind {addr}"))?
        .run()
        .await
        .context("server error")?;

    Ok(())
}

async fn handle_info() -> HttpResponse {
    HttpResponse::Ok().json(resolvers::api_info())
}

async fn handle_not_found(req: HttpRequest) -> HttpResponse {
    debug!(method = %req.method(), path = req.path(), "no route");
    error_response(StatusCode::NOT_FOUND, "Endpoint not found", ErrorCode::NotFound)
}

fn empty_query_response() -> HttpResponse {
    error_response(
        StatusCode::BAD_REQUEST,
        "Request body must contain a non-empty `query`",
        ErrorCode::BadRequest,
    )
}

async fn handle_graphql(
    state: web::Data<AppState>,
    body: web::Json<GraphQLRequest>,
) -> HttpResponse {
    let request = body.into_inner();
    if request.query.trim().is_empty() {
        return empty_query_response();
    }
    HttpResponse::Ok().json(state.executor.execute(&request).await)
}

async fn handle_graphql_stream(
    state: web::Data<AppState>,
    body: web::Json<GraphQLRequest>,
) -> HttpResponse {
    let request = body.into_inner();
    if request.query.trim().is_empty() {
        return empty_query_response();
    }

    let events = streaming::open_event_stream(state.upstream.as_ref(), &request).await;
    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("cache-control", "no-cache"))
        .streaming(events.map(Ok::<_, actix_web::Error>))
}

/// Relays an upstream outcome for the REST routes: success as `200`, an
/// upstream error status with its JSON body as-is.
fn relay_upstream(result: Result<Value, UpstreamError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(UpstreamError::Status { status, body }) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            match serde_json::from_str::<Value>(&body) {
                Ok(value) => HttpResponse::build(status).json(value),
                Err(_) => error_response(
                    status,
                    ResolverError::Upstream {
                        status: status.as_u16(),
                        body,
                    }
                    .to_string(),
                    ErrorCode::InternalError,
                ),
            }
        },
        Err(UpstreamError::MissingApiKey) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            UpstreamError::MissingApiKey.to_string(),
            ErrorCode::ConfigurationError,
        ),
        Err(err) => {
            error!(error = %err, "upstream call failed");
            error_response(StatusCode::BAD_GATEWAY, err.to_string(), ErrorCode::InternalError)
        },
    }
}

async fn handle_models(state: web::Data<AppState>) -> HttpResponse {
    relay_upstream(state.upstream.get_json("/models").await)
}

async fn handle_completion(
    state: &AppState,
    kind: CompletionKind,
    body: Map<String, Value>,
) -> HttpResponse {
    let upstream_body = match resolvers::build_upstream_body(kind, body, false) {
        Ok(upstream_body) => upstream_body,
        Err(err) => {
            return error_response(StatusCode::BAD_REQUEST, err.to_string(), ErrorCode::BadRequest);
        },
    };
    relay_upstream(state.upstream.post_json(kind.path(), &upstream_body).await)
}

async fn handle_chat(
    state: web::Data<AppState>,
    body: web::Json<Map<String, Value>>,
) -> HttpResponse {
    handle_completion(&state, CompletionKind::Chat, body.into_inner()).await
}

async fn handle_completions(
    state: web::Data<AppState>,
    body: web::Json<Map<String, Value>>,
) -> HttpResponse {
    handle_completion(&state, CompletionKind::Completion, body.into_inner()).await
}
