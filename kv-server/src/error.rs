//! Error type for the HTTP dispatcher, mapped to status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failure modes the dispatcher can report to a client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request body/query parameter. `400`.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Key does not exist in the store. `404`.
    #[error("not found")]
    NotFound,

    /// Store I/O or transport failure. `500`.
    #[error("backend error: {0}")]
    Backend(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            ApiError::Backend(e) => {
                tracing::error!(error = %e, "store backend error");
                (StatusCode::INTERNAL_SERVER_ERROR, "backend error".to_string())
            }
        };
        (status, [("content-type", "text/plain")], body).into_response()
    }
}
