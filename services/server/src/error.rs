//! Custom error types for the NoteForest server

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use common::error::StorageError;

/// Custom error type for the HTTP surface
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request failed validation
    #[error("{0}")]
    Validation(String),

    /// The credential has already been configured
    #[error("Password has already been set")]
    AlreadyConfigured,

    /// No credential has been configured yet
    #[error("Password has not been set")]
    NotConfigured,

    /// Password comparison failed
    #[error("Invalid password")]
    InvalidCredentials,

    /// Missing, invalid, or expired session
    #[error("Unauthorized")]
    Unauthorized,

    /// Storage error
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::AlreadyConfigured => (
                StatusCode::BAD_REQUEST,
                "Password has already been set".to_string(),
            ),
            ApiError::NotConfigured => (
                StatusCode::BAD_REQUEST,
                "Password has not been set".to_string(),
            ),
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid password".to_string())
            }
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::Storage(err) => match err {
                StorageError::InvalidId(id) => {
                    (StatusCode::BAD_REQUEST, format!("Invalid note id: {}", id))
                }
                StorageError::MissingField(field) => (
                    StatusCode::BAD_REQUEST,
                    format!("Missing required field: {}", field),
                ),
                StorageError::NotFound(id) => {
                    (StatusCode::NOT_FOUND, format!("Note not found: {}", id))
                }
                other => {
                    error!("Storage failure: {}", other);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "success": false,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
