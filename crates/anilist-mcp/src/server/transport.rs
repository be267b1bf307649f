//! Stateless streamable-HTTP transport.
//!
//! Every `POST /mcp` resolves its own [`Config`] (the `AniList-Token`
//! header wins over the base64 `config` query parameter, which wins over
//! the process default), builds a fresh server and answers a single
//! JSON-RPC message. Nothing is shared between requests.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::protocol::{INTERNAL_ERROR, JsonRpcRequest, JsonRpcResponse, PARSE_ERROR, SERVER_ERROR};
use super::{SERVER_NAME, create_server};
use crate::config::Config;
use crate::config::api::ANILIST_TOKEN_HEADER;

/// Query parameters accepted on `/mcp`.
#[derive(Debug, Default, Deserialize)]
pub struct McpQuery {
    /// Base64-encoded JSON with per-request overrides.
    config: Option<String>,
}

/// Shared state for HTTP handlers.
pub struct HttpState {
    /// Configuration every request starts from.
    pub config: Config,
}

/// Create the HTTP router for MCP.
///
/// `cors_origin` is a comma-separated origin list; `None`, empty or `*`
/// allows any origin.
pub fn create_router(config: Config, cors_origin: Option<&str>) -> Router {
    let state = Arc::new(HttpState { config });

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/mcp",
            post(handle_mcp_post).get(method_not_allowed).delete(method_not_allowed),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors_origin)),
        )
        .with_state(state)
}

/// CORS policy for browser-based MCP clients.
#[must_use]
pub fn cors_layer(cors_origin: Option<&str>) -> CorsLayer {
    let session_header = HeaderName::from_static("mcp-session-id");
    let token_header = HeaderName::from_static("anilist-token");

    CorsLayer::new()
        .allow_origin(allowed_origins(cors_origin))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, session_header.clone(), token_header.clone()])
        .expose_headers([session_header, token_header])
}

fn allowed_origins(cors_origin: Option<&str>) -> AllowOrigin {
    let origins: Vec<HeaderValue> = cors_origin
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %o, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    }
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Handle POST requests to /mcp.
async fn handle_mcp_post(
    State(state): State<Arc<HttpState>>,
    headers: HeaderMap,
    Query(query): Query<McpQuery>,
    body: Bytes,
) -> Response {
    let request: JsonRpcRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            tracing::debug!(error = %e, "Rejecting malformed JSON-RPC body");
            return rpc_error(StatusCode::BAD_REQUEST, PARSE_ERROR, "Parse error");
        }
    };

    tracing::debug!(method = %request.method, "Handling MCP POST request");

    let header_token = headers.get(ANILIST_TOKEN_HEADER).and_then(|v| v.to_str().ok());
    let config = match state.config.resolve_request(header_token, query.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to resolve request configuration");
            return internal_error();
        }
    };

    let server = match create_server(config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create MCP server");
            return internal_error();
        }
    };

    match server.handle_request(&request).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// GET and DELETE on /mcp: no sessions, no server-initiated stream.
async fn method_not_allowed() -> Response {
    rpc_error(StatusCode::METHOD_NOT_ALLOWED, SERVER_ERROR, "Method not allowed.")
}

fn internal_error() -> Response {
    rpc_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR, "Internal server error")
}

fn rpc_error(status: StatusCode, code: i32, message: &str) -> Response {
    (status, Json(JsonRpcResponse::error(None, code, message))).into_response()
}

