//! Unified error handling
//!
//! Application error type and response envelope:
//! - [`AppError`] - application error enum
//! - [`AppResponse`] - API response structure
//!
//! The pricing core itself never produces these - business-data gaps are
//! sentinel values there. `AppError` covers the HTTP boundary: malformed
//! requests, upstream failures, broken reference files.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Unified API response structure
///
/// ```json
/// {
///   "code": "0000",
///   "message": "success",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Error code ("0000" means success)
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> AppResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: "0000".to_string(),
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: None,
        }
    }
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    /// Request failed boundary validation (400)
    Validation(String),

    #[error("Invalid request: {0}")]
    /// Malformed request (400)
    Invalid(String),

    #[error("Resource not found: {0}")]
    /// Unknown route or listing (404)
    NotFound(String),

    #[error("Upstream error: {0}")]
    /// The third-party inventory API failed or answered garbage (502)
    Upstream(String),

    #[error("Internal server error: {0}")]
    /// Anything else (500)
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.as_str()),
            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, "E0006", msg.as_str()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.as_str()),
            AppError::Upstream(msg) => {
                error!(target: "upstream", error = %msg, "Upstream request failed");
                (StatusCode::BAD_GATEWAY, "E8001", msg.as_str())
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "E9001", "Internal server error")
            }
        };

        let body = AppResponse::<()>::error(code, message);
        (status, Json(body)).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Upstream(format!("request timed out: {err}"))
        } else {
            AppError::Upstream(err.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type for API operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let response = AppResponse::success(42);
        assert_eq!(response.code, "0000");
        assert_eq!(response.data, Some(42));
    }

    #[test]
    fn test_status_mapping() {
        let response = AppError::validation("bad range").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::upstream("boom").into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = AppError::not_found("listing 42").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
