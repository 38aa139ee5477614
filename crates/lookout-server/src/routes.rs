use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use lookout_core::LookoutError;
use serde::Serialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(webhook))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Error body returned for failed webhook deliveries.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub code: &'static str,
    pub message: String,
}

/// Webhook entry point: hand the raw payload to the orchestrator and shape
/// the HTTP response.
///
/// A failed delivery never takes the process down; the error is logged and
/// mapped to a status code.
async fn webhook(State(state): State<AppState>, Json(payload): Json<serde_json::Value>) -> Response {
    match state.handler.handle_event(payload).await {
        Ok(outcome) => {
            (StatusCode::OK, Json(json!({ "message": outcome.message() }))).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "webhook delivery failed");
            map_error(&err).into_response()
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Map a handler failure to a status code and error envelope.
///
/// Validation failures are the caller's fault (400); upstream transport
/// and structural failures surface as 502 so the webhook sender can tell
/// "you sent garbage" apart from "my dependencies are down".
pub fn map_error(err: &LookoutError) -> (StatusCode, Json<ErrorEnvelope>) {
    let (status, code) = match err {
        LookoutError::Validation(_) => (StatusCode::BAD_REQUEST, "invalid_event"),
        LookoutError::GitHub(_) => (StatusCode::BAD_GATEWAY, "upstream_error"),
        LookoutError::Llm(_) => (StatusCode::BAD_GATEWAY, "llm_error"),
        LookoutError::LlmResponse(_) => (StatusCode::BAD_GATEWAY, "llm_response_error"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    };

    (
        status,
        Json(ErrorEnvelope {
            code,
            message: err.to_string(),
        }),
    )
}
