//! Type-safe error codes for API responses.
//!
//! Each error code carries a string identifier, an integer for logs and
//! monitoring, and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::EmbeddingFailed;
//! assert_eq!(code.as_str(), "EMBEDDING_FAILED");
//! assert_eq!(code.code(), 3001);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed (missing or malformed field)
    ValidationError,

    /// Requested resource was not found
    NotFound,

    /// HTTP method is not supported by the route
    MethodNotAllowed,

    // Server errors (1000s)
    /// An unexpected internal server error occurred
    InternalError,

    // Upstream dependency errors (3000-3999)
    /// Embedding provider call failed
    EmbeddingFailed,

    /// Vector store write failed
    VectorUpsertFailed,

    /// Vector store search failed
    VectorSearchFailed,

    /// Chat completion provider call failed
    CompletionFailed,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier for programmatic handling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::EmbeddingFailed => "EMBEDDING_FAILED",
            Self::VectorUpsertFailed => "VECTOR_UPSERT_FAILED",
            Self::VectorSearchFailed => "VECTOR_SEARCH_FAILED",
            Self::CompletionFailed => "COMPLETION_FAILED",
        }
    }

    /// Integer code for logging and monitoring.
    ///
    /// - 1000-1999: client and generic server errors
    /// - 3000-3999: upstream dependency failures
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::MethodNotAllowed => 1012,
            Self::EmbeddingFailed => 3001,
            Self::VectorUpsertFailed => 3002,
            Self::VectorSearchFailed => 3003,
            Self::CompletionFailed => 3004,
        }
    }

    /// Default user-facing message.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::NotFound => "The requested resource was not found",
            Self::MethodNotAllowed => "Method not allowed",
            Self::InternalError => "Internal server error",
            Self::EmbeddingFailed => "Failed to generate embedding",
            Self::VectorUpsertFailed => "Failed to upsert data into Qdrant",
            Self::VectorSearchFailed => "Failed to search Qdrant",
            Self::CompletionFailed => "Failed to generate chat completion",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_codes_carry_stage_messages() {
        assert_eq!(
            ErrorCode::EmbeddingFailed.default_message(),
            "Failed to generate embedding"
        );
        assert_eq!(
            ErrorCode::VectorUpsertFailed.default_message(),
            "Failed to upsert data into Qdrant"
        );
        assert_eq!(
            ErrorCode::VectorSearchFailed.default_message(),
            "Failed to search Qdrant"
        );
    }

    #[test]
    fn test_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorCode::VectorSearchFailed).unwrap();
        assert_eq!(json, "\"VECTOR_SEARCH_FAILED\"");
        assert_eq!(ErrorCode::VectorSearchFailed.to_string(), "VECTOR_SEARCH_FAILED");
    }

    #[test]
    fn test_codes_are_unique() {
        let all = [
            ErrorCode::ValidationError,
            ErrorCode::NotFound,
            ErrorCode::MethodNotAllowed,
            ErrorCode::InternalError,
            ErrorCode::EmbeddingFailed,
            ErrorCode::VectorUpsertFailed,
            ErrorCode::VectorSearchFailed,
            ErrorCode::CompletionFailed,
        ];
        let mut seen = std::collections::HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }
}
