use std::time::Duration;

use async_trait::async_trait;
use core_config::qdrant::QdrantConfig;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    self, CreateCollectionBuilder, Distance, PointId, PointStruct, SearchPointsBuilder,
    UpsertPointsBuilder, VectorParamsBuilder,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::payload::{json_to_payload, payload_to_json};
use crate::error::{VectorError, VectorResult};
use crate::models::{CollectionSpec, DistanceMetric, Point, ScoredPayload, SearchQuery};
use crate::repository::VectorRepository;

/// Qdrant-backed implementation of VectorRepository
pub struct QdrantRepository {
    client: Qdrant,
}

impl QdrantRepository {
    pub fn new(config: &QdrantConfig) -> VectorResult<Self> {
        if config.uses_rest_port() {
            warn!(
                url = %config.url,
                "QDRANT_URL points at the REST port 6333; this client needs the gRPC port (6334)"
            );
        }

        let client = Qdrant::from_url(&config.url)
            .api_key(config.api_key.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VectorError::Qdrant(format!("Failed to build client: {}", e)))?;

        Ok(Self { client })
    }

    fn to_qdrant_distance(metric: DistanceMetric) -> Distance {
        match metric {
            DistanceMetric::Cosine => Distance::Cosine,
        }
    }

    /// Qdrant rejects a duplicate create with an "already exists" message
    fn is_already_exists(message: &str) -> bool {
        message.contains("already exists")
    }

    fn uuid_to_point_id(id: Uuid) -> PointId {
        PointId::from(id.to_string())
    }

    /// Numeric ids are not produced by this service and map to `None`.
    fn point_id_to_uuid(point_id: &PointId) -> Option<Uuid> {
        match &point_id.point_id_options {
            Some(qdrant::point_id::PointIdOptions::Uuid(uuid_str)) => {
                Uuid::parse_str(uuid_str).ok()
            }
            _ => None,
        }
    }

    fn to_point_struct(point: Point) -> VectorResult<PointStruct> {
        let payload = serde_json::to_value(&point.payload)?;
        Ok(PointStruct::new(
            Self::uuid_to_point_id(point.id),
            point.vector,
            json_to_payload(payload),
        ))
    }
}

#[async_trait]
impl VectorRepository for QdrantRepository {
    async fn collection_exists(&self, collection_name: &str) -> VectorResult<bool> {
        Ok(self.client.collection_exists(collection_name).await?)
    }

    async fn create_collection(&self, spec: &CollectionSpec) -> VectorResult<bool> {
        let builder = CreateCollectionBuilder::new(&spec.name).vectors_config(
            VectorParamsBuilder::new(
                u64::from(spec.dimension),
                Self::to_qdrant_distance(spec.distance),
            ),
        );

        match self.client.create_collection(builder).await {
            Ok(_) => {
                info!(collection = %spec.name, dimension = spec.dimension, "Created collection");
                Ok(true)
            }
            // Lost a creation race with a concurrent request
            Err(e) if Self::is_already_exists(&e.to_string()) => {
                debug!(collection = %spec.name, "Collection already exists");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn upsert(
        &self,
        collection_name: &str,
        points: Vec<Point>,
        wait: bool,
    ) -> VectorResult<usize> {
        let count = points.len();
        let points = points
            .into_iter()
            .map(Self::to_point_struct)
            .collect::<VectorResult<Vec<_>>>()?;

        let builder = UpsertPointsBuilder::new(collection_name, points).wait(wait);
        self.client.upsert_points(builder).await?;

        Ok(count)
    }

    async fn search(
        &self,
        collection_name: &str,
        query: SearchQuery,
    ) -> VectorResult<Vec<ScoredPayload>> {
        let builder = SearchPointsBuilder::new(collection_name, query.vector, query.limit)
            .with_payload(query.with_payload)
            .with_vectors(false);

        let results = self.client.search_points(builder).await?;

        Ok(results
            .result
            .into_iter()
            .map(|point| ScoredPayload {
                id: point.id.as_ref().and_then(Self::point_id_to_uuid),
                score: point.score,
                payload: payload_to_json(point.payload),
            })
            .collect())
    }

    async fn health_check(&self) -> VectorResult<()> {
        self.client.health_check().await?;
        Ok(())
    }
}
