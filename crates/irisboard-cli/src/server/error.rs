//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use irisboard::IrisboardError;
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Internal server error.
    Internal(String),
    /// Error from irisboard library.
    Irisboard(IrisboardError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
            ApiError::Irisboard(e @ IrisboardError::ColumnNotFound(_)) => {
                (StatusCode::BAD_REQUEST, "column_not_found", e.to_string())
            }
            ApiError::Irisboard(e @ IrisboardError::InvalidInput(_)) => {
                (StatusCode::BAD_REQUEST, "invalid_input", e.to_string())
            }
            ApiError::Irisboard(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "irisboard_error",
                e.to_string(),
            ),
        };

        if status.is_server_error() {
            tracing::error!(error, %message, "request failed");
        }

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<IrisboardError> for ApiError {
    fn from(err: IrisboardError) -> Self {
        ApiError::Irisboard(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Irisboard(e) => write!(f, "Irisboard error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
