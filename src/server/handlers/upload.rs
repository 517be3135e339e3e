//! PDF upload endpoint.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::super::AppState;
use super::errors::detail;
use crate::extraction::PDF_MIME_TYPE;

/// Multipart field carrying the document.
const FILE_FIELD: &str = "file";

/// Extract patient identity from an uploaded PDF and create an order from it.
pub async fn upload_pdf(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut document = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return detail(StatusCode::BAD_REQUEST, e.body_text()),
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        if field.content_type() != Some(PDF_MIME_TYPE) {
            tracing::debug!("Rejected upload with content type {:?}", field.content_type());
            return detail(
                StatusCode::BAD_REQUEST,
                "Invalid file type. Only PDF files are supported.",
            );
        }

        let filename = field.file_name().unwrap_or("upload.pdf").to_string();
        match field.bytes().await {
            Ok(bytes) => {
                tracing::info!("Received {} ({} bytes)", filename, bytes.len());
                document = Some(bytes.to_vec());
            }
            Err(e) => return detail(StatusCode::BAD_REQUEST, e.body_text()),
        }
        break;
    }

    let Some(bytes) = document else {
        return detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Missing multipart field 'file'",
        );
    };

    match state.orders.create_from_document(bytes).await {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => e.into_response(),
    }
}
