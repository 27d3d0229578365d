//! API error type and response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the deposition API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn deposition_not_found() -> Self {
        ApiError::NotFound("Deposition not found".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Not-found and bad-request bodies use the `message` key the
        // endpoint's existing clients expect.
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "message": msg })),
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "message": msg })),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg })),
        };

        (status, Json(body)).into_response()
    }
}
