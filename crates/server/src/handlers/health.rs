//! Liveness and readiness endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::warn;

use crate::state::AppState;

pub(crate) async fn liveness() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Ready only when the storage engine answers a probe.
pub(crate) async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    match state.pinger.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(err) => {
            warn!(error = %err, "readiness probe failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "status": "unavailable" })))
        }
    }
}
