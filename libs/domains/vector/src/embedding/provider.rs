use async_trait::async_trait;

use crate::error::VectorResult;
use crate::models::EmbeddingModel;

/// Trait for embedding generation providers
///
/// Implementations call a hosted embedding API and return the raw vector.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate a `dimensions`-long embedding for `text`
    async fn embed(
        &self,
        model: EmbeddingModel,
        dimensions: u32,
        text: &str,
    ) -> VectorResult<Vec<f32>>;
}
