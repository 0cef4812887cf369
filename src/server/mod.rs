//! The extraction proxy: a stateless relay holding the API credential.
//!
//! One inbound `POST /api/extract` maps to exactly one outbound model call.
//! The handler owns no cross-request state beyond a shared HTTP client, does
//! no retrying and no batching, and reads its configuration from the
//! [`ServerConfig`] injected at construction — never from the process
//! environment. That keeps the handler deterministic under test: the missing
//! credential path and the upstream URL are both plain constructor inputs.
//!
//! Method handling: routing `/api/extract` through `post(...)` makes axum
//! answer every other method on that path with `405 Method Not Allowed`.

pub mod gemini;

use crate::wire::{ExtractRequest, ExtractResponse};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Fixed model identifier used for every upstream call.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default upstream API base.
pub const DEFAULT_UPSTREAM: &str = "https://generativelanguage.googleapis.com";

/// Path the relay client posts to.
pub const EXTRACT_PATH: &str = "/api/extract";

/// Plain-text body for a request that arrives while no credential is
/// configured. Fatal per request, never retried.
pub const MISSING_KEY_MESSAGE: &str = "API key not configured on the server.";

/// Plain-text body for any upstream failure. Deliberately generic: the
/// detail goes to the log, not to the client.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "An error occurred on the server.";

/// Proxy configuration, injected at construction.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Credential for the upstream model API. Absence is a per-request 500,
    /// not a startup failure.
    pub api_key: Option<String>,
    /// Upstream model identifier.
    pub model: String,
    /// Upstream API base URL. Overridable so tests can point the proxy at a
    /// local stand-in.
    pub upstream_base: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            upstream_base: DEFAULT_UPSTREAM.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }
}

struct ServerState {
    config: ServerConfig,
    http: reqwest::Client,
}

/// Build the proxy router. CORS is fully permissive: the credential lives
/// server-side, and the endpoint accepts uploads from any origin.
pub fn router(config: ServerConfig) -> Router {
    let state = Arc::new(ServerState {
        config,
        http: reqwest::Client::new(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(EXTRACT_PATH, post(extract_handler))
        .layer(cors)
        .with_state(state)
}

/// Serve the proxy on an already-bound listener until the task is dropped.
pub async fn serve(
    listener: tokio::net::TcpListener,
    config: ServerConfig,
) -> std::io::Result<()> {
    info!(
        "Extraction proxy listening on {}",
        listener.local_addr().map(|a| a.to_string()).unwrap_or_default()
    );
    axum::serve(listener, router(config)).await
}

async fn extract_handler(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<ExtractRequest>,
) -> Response {
    let Some(api_key) = state
        .config
        .api_key
        .as_deref()
        .filter(|k| !k.is_empty())
    else {
        return (StatusCode::INTERNAL_SERVER_ERROR, MISSING_KEY_MESSAGE).into_response();
    };

    info!(
        "Relaying extraction request: {} image parts",
        request.image_parts.len()
    );

    match gemini::generate_content(
        &state.http,
        &state.config.upstream_base,
        api_key,
        &state.config.model,
        &request.prompt,
        &request.image_parts,
    )
    .await
    {
        Ok(text) => Json(ExtractResponse { text }).into_response(),
        Err(e) => {
            error!("Upstream extraction call failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILURE_MESSAGE).into_response()
        }
    }
}
