//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used by the
//! validation service. It follows the `thiserror` pattern for ergonomic error handling.
//!
//! A rejected field value is **not** an `AppError`: rejections are ordinary
//! results carried in [`ValidationResponse`](crate::dto::ValidationResponse).
//! `AppError` covers requests the service cannot answer at all.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx)
//!    - [`InvalidInput`](AppError::InvalidInput) → 400 Bad Request
//!    - [`NotFound`](AppError::NotFound) → 404 Not Found
//!
//! 2. **Server Errors** (5xx)
//!    - [`Config`](AppError::Config) → 500 Internal Server Error
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn require_password(password: Option<&str>) -> Result<&str> {
//!     password.ok_or_else(|| AppError::InvalidInput("password is required".to_string()))
//! }
//!
//! assert!(require_password(None).is_err());
//! ```

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lib_utils::{EnvError, UnknownField};
use serde_json::json;
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error during startup or environment loading.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed request that cannot be validated.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested resource (e.g. an unknown field name) not found.
    ///
    /// **HTTP Status**: 404 Not Found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// For server errors, returns a generic message to avoid exposing implementation details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Config(_) => "An internal error occurred".to_string(),
        }
    }

    /// Variant name, sent to clients as the `code` field.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Config",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let body = Json(json!({
            "error": self.user_message(),
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}

/// Convert a JSON body extraction failure to `AppError`.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<UnknownField> for AppError {
    fn from(err: UnknownField) -> Self {
        AppError::NotFound(err.to_string())
    }
}

impl From<EnvError> for AppError {
    fn from(err: EnvError) -> Self {
        AppError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidInput("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Config("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = AppError::Config("LOG_LEVEL must be one of ...".into());
        assert_eq!(err.user_message(), "An internal error occurred");

        let err = AppError::NotFound("Unknown field: zip".into());
        assert_eq!(err.user_message(), "Unknown field: zip");
    }

    #[test]
    fn test_unknown_field_maps_to_not_found() {
        let err: AppError = "zip".parse::<lib_utils::Field>().unwrap_err().into();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Unknown field: zip"));
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = AppError::InvalidInput("password is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "password is required");
        assert_eq!(json["code"], "InvalidInput");
    }
}
