use std::fmt;

use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use thiserror::Error;

/// Progress of a user-context request.
///
/// `CollectionChecked → Embedded → Upserted → Searched → Responded`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CollectionChecked,
    Embedded,
    Upserted,
    Searched,
    Responded,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::CollectionChecked => "collection_checked",
            Stage::Embedded => "embedded",
            Stage::Upserted => "upserted",
            Stage::Searched => "searched",
            Stage::Responded => "responded",
        }
    }

    /// Error code reported when the request fails to reach this stage
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Stage::Embedded => ErrorCode::EmbeddingFailed,
            Stage::Upserted => ErrorCode::VectorUpsertFailed,
            Stage::Searched => ErrorCode::VectorSearchFailed,
            Stage::CollectionChecked | Stage::Responded => ErrorCode::InternalError,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum VectorError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Qdrant error: {0}")]
    Qdrant(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// The request could not reach `stage`
    #[error("failed to reach stage {stage}: {source}")]
    Failed {
        stage: Stage,
        #[source]
        source: Box<VectorError>,
    },
}

pub type VectorResult<T> = Result<T, VectorError>;

impl VectorError {
    /// Tags the error with the stage the request was trying to reach.
    /// An already tagged error keeps its original stage.
    pub fn at(self, stage: Stage) -> Self {
        match self {
            tagged @ VectorError::Failed { .. } => tagged,
            other => VectorError::Failed {
                stage,
                source: Box::new(other),
            },
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            VectorError::Failed { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

impl From<qdrant_client::QdrantError> for VectorError {
    fn from(err: qdrant_client::QdrantError) -> Self {
        VectorError::Qdrant(err.to_string())
    }
}

impl From<reqwest::Error> for VectorError {
    fn from(err: reqwest::Error) -> Self {
        VectorError::Embedding(err.to_string())
    }
}

impl From<serde_json::Error> for VectorError {
    fn from(err: serde_json::Error) -> Self {
        VectorError::Internal(format!("JSON error: {}", err))
    }
}

/// Convert VectorError to AppError for standardized HTTP error responses
impl From<VectorError> for AppError {
    fn from(err: VectorError) -> Self {
        match err {
            VectorError::Validation(msg) => AppError::BadRequest(msg),
            VectorError::Failed { stage, source } => match stage.error_code() {
                ErrorCode::InternalError => AppError::InternalServerError(source.to_string()),
                code => AppError::dependency(code, source.to_string()),
            },
            VectorError::Embedding(msg) => AppError::dependency(ErrorCode::EmbeddingFailed, msg),
            VectorError::Qdrant(msg) => {
                AppError::InternalServerError(format!("Qdrant error: {}", msg))
            }
            VectorError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for VectorError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
