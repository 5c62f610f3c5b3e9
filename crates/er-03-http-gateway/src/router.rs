//! HTTP routes.
//!
//! `/` relays the body verbatim for any method and always answers 200. On any failure
//! the body is a fixed placeholder and the cause goes to the log only.

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::warn;

use er_02_relay::Relay;

use crate::error::GatewayError;

/// Body returned to the client whenever relaying fails.
pub const ERROR_PLACEHOLDER: &str = "error, see relay logs for details";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
    pub max_body_bytes: usize,
}

/// Build the gateway router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(handle_relay))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_relay(State(state): State<AppState>, body: Body) -> Response {
    match relay_body(&state, body).await {
        Ok(response) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            response,
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "relay request failed");
            (StatusCode::OK, ERROR_PLACEHOLDER).into_response()
        }
    }
}

async fn relay_body(state: &AppState, body: Body) -> Result<Vec<u8>, GatewayError> {
    let bytes = axum::body::to_bytes(body, state.max_body_bytes)
        .await
        .map_err(|e| GatewayError::Body(e.to_string()))?;
    let request = state.relay.validate_request(&bytes)?;
    Ok(state.relay.forward_request(request).await?)
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": state.relay.state().to_string(),
        "peers": state.relay.peer_count(),
    }))
}
