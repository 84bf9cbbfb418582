use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{0}")]
    Provider(String),
}

pub type ChatResult<T> = Result<T, ChatError>;

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Provider(err.to_string())
    }
}

/// Convert ChatError to AppError for standardized HTTP error responses
impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Validation(msg) => AppError::BadRequest(msg),
            ChatError::Provider(msg) => AppError::dependency(ErrorCode::CompletionFailed, msg),
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
