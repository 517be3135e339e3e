//! Audit log and health endpoints.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};

use super::super::AppState;

/// List every audit entry.
pub async fn list_logs(State(state): State<AppState>) -> Response {
    match state.orders.logs().await {
        Ok(logs) => Json(logs).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Liveness probe.
pub async fn health() -> &'static str {
    "OK"
}
