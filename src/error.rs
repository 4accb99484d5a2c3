//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    extract::{multipart::MultipartRejection, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and a client-facing
/// message. Internal details (database errors, upstream failures) are logged
/// and never sent to the client.
///
/// # Error Categories
///
/// - **Credential Errors**: Missing, malformed or invalid bearer tokens
/// - **Validation Errors**: Invalid request data
/// - **Resource Errors**: Requested blog post not found
/// - **Upstream Errors**: The content generation service failed
/// - **Internal Errors**: Database, storage or other server-side failures
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// `Authorization` header absent or not of the form `Bearer <token>`.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Unauthorized - Token missing or malformed")]
    MissingCredential,

    /// Token failed signature, expiry or payload verification.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid token")]
    InvalidCredential,

    /// Admin login with wrong email or password.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid credentials")]
    InvalidLogin,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String is the message shown to the client.
    #[error("{0}")]
    Validation(String),

    /// Request body exceeds the configured upload limit.
    ///
    /// Returns HTTP 413 Payload Too Large.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Requested blog post does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Blog not found")]
    BlogNotFound,

    /// The external content generation service failed.
    ///
    /// Returns HTTP 502 Bad Gateway with a generic message.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Database operation failed (e.g., connection error, query error).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Image storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Any other server-side failure (e.g. token encoding, corrupt rows).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status and client-facing message for this error.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::MissingCredential | AppError::InvalidCredential | AppError::InvalidLogin => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
            AppError::BlogNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Upstream(_) => (
                StatusCode::BAD_GATEWAY,
                "Content generation failed".to_string(),
            ),
            AppError::Database(_) | AppError::Storage(_) | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
            ),
        }
    }
}

/// Malformed JSON bodies are validation errors with the `{success, message}` shape.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "success": false,
///   "message": "Human-readable error message"
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `MissingCredential`, `InvalidCredential`, `InvalidLogin` → 401 Unauthorized
/// - `Validation` → 400 Bad Request
/// - `PayloadTooLarge` → 413 Payload Too Large
/// - `BlogNotFound` → 404 Not Found
/// - `Upstream` → 502 Bad Gateway (hides details from client)
/// - `Database`, `Storage`, `Internal` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        match &self {
            AppError::Upstream(detail) => tracing::error!("Content generation failed: {}", detail),
            AppError::Database(_) | AppError::Storage(_) | AppError::Internal(_) => {
                tracing::error!("{}", self)
            }
            _ => {}
        }

        let body = Json(json!({
            "success": false,
            "message": message
        }));

        (status, body).into_response()
    }
}
