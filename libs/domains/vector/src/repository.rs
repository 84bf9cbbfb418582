use async_trait::async_trait;

use crate::error::VectorResult;
use crate::models::{CollectionSpec, Point, ScoredPayload, SearchQuery};

/// Repository trait for vector storage operations
///
/// This trait abstracts the underlying vector database (Qdrant).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorRepository: Send + Sync {
    // ===== Collection Management =====

    /// Whether a collection with this name exists
    async fn collection_exists(&self, collection_name: &str) -> VectorResult<bool>;

    /// Create a collection.
    ///
    /// Returns `true` if this call created it and `false` if it already
    /// existed, so concurrent callers can tell who won.
    async fn create_collection(&self, spec: &CollectionSpec) -> VectorResult<bool>;

    // ===== Point Operations =====

    /// Insert or replace points by id. With `wait` the call returns once
    /// the write is applied.
    async fn upsert(
        &self,
        collection_name: &str,
        points: Vec<Point>,
        wait: bool,
    ) -> VectorResult<usize>;

    /// Nearest neighbours of `query.vector`, ordered by non-increasing score
    async fn search(
        &self,
        collection_name: &str,
        query: SearchQuery,
    ) -> VectorResult<Vec<ScoredPayload>>;

    /// Ping the backing store
    async fn health_check(&self) -> VectorResult<()>;
}
