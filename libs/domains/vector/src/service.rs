use std::sync::Arc;

use tracing::{Span, debug, info};
use uuid::Uuid;

use crate::embedding::EmbeddingProvider;
use crate::error::{Stage, VectorError, VectorResult};
use crate::models::{
    CollectionSpec, EmbeddingModel, Point, Recommendation, SEARCH_LIMIT, SearchQuery,
    UserContextInput, UserContextRequest, UserPayload,
};
use crate::repository::VectorRepository;
use crate::seed::SeedLoader;

pub const USER_CONTEXT_REQUIRED: &str = "user_context field is required in body";

/// Records a user context and returns the most similar stored profiles.
///
/// Each request runs `ensure collection → embed → upsert → search` in order
/// and stops at the first failing stage.
pub struct UserContextService<R: VectorRepository> {
    repository: Arc<R>,
    embedder: Arc<dyn EmbeddingProvider>,
    seed_loader: SeedLoader<R>,
    collection: CollectionSpec,
    model: EmbeddingModel,
}

impl<R: VectorRepository> UserContextService<R> {
    pub fn new(
        repository: Arc<R>,
        embedder: Arc<dyn EmbeddingProvider>,
        collection_name: impl Into<String>,
    ) -> Self {
        let collection = CollectionSpec::new(collection_name);
        let seed_loader = SeedLoader::new(
            Arc::clone(&repository),
            Arc::clone(&embedder),
            collection.name.clone(),
        );

        Self {
            repository,
            embedder,
            seed_loader,
            collection,
            model: EmbeddingModel::TextEmbedding3Small,
        }
    }

    pub fn collection(&self) -> &CollectionSpec {
        &self.collection
    }

    /// Ping the vector store for readiness probes
    pub async fn health_check(&self) -> VectorResult<()> {
        self.repository.health_check().await
    }

    /// Create the collection if missing; the request that creates it also
    /// seeds it. Returns whether this call created the collection.
    #[tracing::instrument(skip(self), fields(collection = %self.collection.name))]
    pub async fn ensure_collection(&self) -> VectorResult<bool> {
        if self
            .repository
            .collection_exists(&self.collection.name)
            .await?
        {
            return Ok(false);
        }

        if !self.repository.create_collection(&self.collection).await? {
            debug!("Collection created concurrently, skipping seed");
            return Ok(false);
        }

        let seeded = self.seed_loader.seed().await?;
        info!(seeded, "Initialized collection with sample data");
        Ok(true)
    }

    /// Validate, store and search. Validation runs before any external call.
    #[tracing::instrument(skip(self, request), fields(point_id))]
    pub async fn record_and_recommend(
        &self,
        request: UserContextRequest,
    ) -> VectorResult<Vec<Recommendation>> {
        let input = request
            .validate()
            .ok_or_else(|| VectorError::Validation(USER_CONTEXT_REQUIRED.to_string()))?;

        self.ensure_collection()
            .await
            .map_err(|e| e.at(Stage::CollectionChecked))?;
        debug!(stage = %Stage::CollectionChecked, "Stage complete");

        let vector = self
            .embed(&input.user_context)
            .await
            .map_err(|e| e.at(Stage::Embedded))?;
        debug!(stage = %Stage::Embedded, "Stage complete");

        let point_id = Uuid::new_v4();
        Span::current().record("point_id", tracing::field::display(point_id));

        self.upsert(point_id, vector.clone(), input)
            .await
            .map_err(|e| e.at(Stage::Upserted))?;
        debug!(stage = %Stage::Upserted, "Stage complete");

        let hits = self
            .repository
            .search(&self.collection.name, SearchQuery::new(vector, SEARCH_LIMIT))
            .await
            .map_err(|e| e.at(Stage::Searched))?;
        debug!(stage = %Stage::Searched, hits = hits.len(), "Stage complete");

        let recommendations: Vec<Recommendation> =
            hits.into_iter().filter_map(Recommendation::from_scored).collect();

        info!(
            stage = %Stage::Responded,
            count = recommendations.len(),
            "Returning recommendations"
        );
        Ok(recommendations)
    }

    async fn embed(&self, text: &str) -> VectorResult<Vec<f32>> {
        let vector = self
            .embedder
            .embed(self.model, self.collection.dimension, text)
            .await?;

        if vector.len() != self.collection.dimension as usize {
            return Err(VectorError::Embedding(format!(
                "expected {} dimensions, got {}",
                self.collection.dimension,
                vector.len()
            )));
        }

        Ok(vector)
    }

    async fn upsert(
        &self,
        id: Uuid,
        vector: Vec<f32>,
        input: UserContextInput,
    ) -> VectorResult<usize> {
        let payload = UserPayload::new(id, input.user_context).with_name(input.name);

        self.repository
            .upsert(
                &self.collection.name,
                vec![Point::new(id, vector, payload)],
                true,
            )
            .await
    }
}
