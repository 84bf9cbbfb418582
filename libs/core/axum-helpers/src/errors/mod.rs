pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Standard error response structure.
///
/// Returned for every non-2xx response:
/// - `code`: integer error code for logging/monitoring (e.g., 3001)
/// - `error`: human-readable error (for dependency failures, the failing stage)
/// - `details`: optional underlying cause
///
/// ```json
/// {
///   "code": 3001,
///   "error": "Failed to generate embedding",
///   "details": "OpenAI API error (429): quota exceeded"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Error message; for upstream failures this names the failing stage
    pub error: String,
    /// Optional underlying cause
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// An upstream call (embedding, vector store, completion) failed.
    /// `code` identifies the stage; `details` carries the upstream message.
    #[error("{}: {details}", code.default_message())]
    Dependency { code: ErrorCode, details: String },

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn dependency(code: ErrorCode, details: impl Into<String>) -> Self {
        AppError::Dependency {
            code,
            details: details.into(),
        }
    }

    /// HTTP status this error renders with
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Dependency { .. } | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (code, error, details) = match self {
            AppError::BadRequest(msg) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Bad request: {}",
                    msg
                );
                (ErrorCode::ValidationError, msg, None)
            }
            AppError::Dependency { code, details } => {
                tracing::error!(
                    error_code = code.code(),
                    stage = code.as_str(),
                    "{}: {}",
                    code.default_message(),
                    details
                );
                (
                    code,
                    code.default_message().to_string(),
                    Some(serde_json::Value::String(details)),
                )
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                (
                    ErrorCode::InternalError,
                    ErrorCode::InternalError.default_message().to_string(),
                    Some(serde_json::Value::String(msg)),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code.code(),
            error,
            details,
        });

        (status, body).into_response()
    }
}

/// Helper function to create error responses outside of `AppError`.
pub fn error_response(status: StatusCode, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.default_message().to_string(),
        details: None,
    });

    (status, body).into_response()
}
