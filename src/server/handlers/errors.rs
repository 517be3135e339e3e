//! Mapping of service errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::extraction::{ExtractionError, ExtractionFailure};
use crate::services::ServiceError;

/// A `{"detail": ...}` response.
pub fn detail(status: StatusCode, detail: impl Into<serde_json::Value>) -> Response {
    (status, Json(serde_json::json!({ "detail": detail.into() }))).into_response()
}

/// Diagnostic body returned when a document yields no identity.
pub fn unresolved_detail(failure: &ExtractionFailure) -> serde_json::Value {
    serde_json::json!({
        "message": failure.reason,
        "first_name": failure.first_name,
        "last_name": failure.last_name,
        "dob": failure.date_of_birth,
        "candidate_name_lines": failure.candidate_lines,
        "all_dates": failure.all_dates,
        "patient_name": failure.full_name,
    })
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::NotFound(_) => detail(StatusCode::NOT_FOUND, "Order not found"),
            ServiceError::Unresolved(failure) => {
                detail(StatusCode::BAD_REQUEST, unresolved_detail(&failure))
            }
            ServiceError::Extraction(e @ ExtractionError::InvalidDocument(_)) => {
                detail(StatusCode::BAD_REQUEST, e.to_string())
            }
            ServiceError::Extraction(e) if e.is_missing_tool() => {
                tracing::error!("Extraction unavailable: {}", e);
                detail(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
            }
            e => {
                tracing::error!("Request failed: {}", e);
                detail(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}
