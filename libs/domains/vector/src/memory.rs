//! In-memory vector store for tests and local development.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{VectorError, VectorResult};
use crate::models::{CollectionSpec, DistanceMetric, Point, ScoredPayload, SearchQuery};
use crate::repository::VectorRepository;

#[derive(Debug)]
struct Collection {
    spec: CollectionSpec,
    points: HashMap<Uuid, Point>,
}

/// Brute-force vector store backed by a `HashMap` per collection
#[derive(Debug, Clone, Default)]
pub struct InMemoryVectorRepository {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
}

impl InMemoryVectorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of points in a collection, `None` if it does not exist
    pub async fn count(&self, collection_name: &str) -> Option<usize> {
        let collections = self.collections.read().await;
        collections.get(collection_name).map(|c| c.points.len())
    }

    /// Fetch a stored point by id
    pub async fn get(&self, collection_name: &str, id: Uuid) -> Option<Point> {
        let collections = self.collections.read().await;
        collections
            .get(collection_name)
            .and_then(|c| c.points.get(&id).cloned())
    }
}

fn score(metric: DistanceMetric, a: &[f32], b: &[f32]) -> f32 {
    match metric {
        DistanceMetric::Cosine => {
            let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
            let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
            let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm_a == 0.0 || norm_b == 0.0 {
                0.0
            } else {
                dot / (norm_a * norm_b)
            }
        }
    }
}

#[async_trait]
impl VectorRepository for InMemoryVectorRepository {
    async fn collection_exists(&self, collection_name: &str) -> VectorResult<bool> {
        Ok(self.collections.read().await.contains_key(collection_name))
    }

    async fn create_collection(&self, spec: &CollectionSpec) -> VectorResult<bool> {
        let mut collections = self.collections.write().await;
        if collections.contains_key(&spec.name) {
            return Ok(false);
        }
        collections.insert(
            spec.name.clone(),
            Collection {
                spec: spec.clone(),
                points: HashMap::new(),
            },
        );
        Ok(true)
    }

    async fn upsert(
        &self,
        collection_name: &str,
        points: Vec<Point>,
        _wait: bool,
    ) -> VectorResult<usize> {
        let mut collections = self.collections.write().await;
        let collection = collections.get_mut(collection_name).ok_or_else(|| {
            VectorError::Qdrant(format!("Collection `{}` doesn't exist", collection_name))
        })?;

        let dimension = collection.spec.dimension as usize;
        if let Some(bad) = points.iter().find(|p| p.vector.len() != dimension) {
            return Err(VectorError::Qdrant(format!(
                "Wrong input: Vector dimension error: expected dim: {}, got {}",
                dimension,
                bad.vector.len()
            )));
        }

        let count = points.len();
        for point in points {
            collection.points.insert(point.id, point);
        }
        Ok(count)
    }

    async fn search(
        &self,
        collection_name: &str,
        query: SearchQuery,
    ) -> VectorResult<Vec<ScoredPayload>> {
        let collections = self.collections.read().await;
        let collection = collections.get(collection_name).ok_or_else(|| {
            VectorError::Qdrant(format!("Collection `{}` doesn't exist", collection_name))
        })?;

        let mut hits = collection
            .points
            .values()
            .map(|point| {
                let payload = if query.with_payload {
                    Some(serde_json::to_value(&point.payload)?)
                } else {
                    None
                };
                Ok(ScoredPayload {
                    id: Some(point.id),
                    score: score(collection.spec.distance, &query.vector, &point.vector),
                    payload,
                })
            })
            .collect::<VectorResult<Vec<_>>>()?;

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(query.limit as usize);
        Ok(hits)
    }

    async fn health_check(&self) -> VectorResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserPayload;

    fn spec() -> CollectionSpec {
        CollectionSpec {
            name: "users".to_string(),
            dimension: 2,
            distance: DistanceMetric::Cosine,
        }
    }

    fn point(vector: Vec<f32>) -> Point {
        let id = Uuid::new_v4();
        Point::new(id, vector, UserPayload::new(id, "ctx"))
    }

    #[tokio::test]
    async fn test_create_is_idempotent() {
        let repo = InMemoryVectorRepository::new();
        assert!(!repo.collection_exists("users").await.unwrap());
        assert!(repo.create_collection(&spec()).await.unwrap());
        assert!(!repo.create_collection(&spec()).await.unwrap());
        assert!(repo.collection_exists("users").await.unwrap());
    }

    #[tokio::test]
    async fn test_search_orders_by_score_and_limits() {
        let repo = InMemoryVectorRepository::new();
        repo.create_collection(&spec()).await.unwrap();

        let near = point(vec![1.0, 0.1]);
        let far = point(vec![-1.0, 0.0]);
        let mid = point(vec![0.5, 0.5]);
        repo.upsert("users", vec![far, near.clone(), mid], true)
            .await
            .unwrap();

        let hits = repo
            .search("users", SearchQuery::new(vec![1.0, 0.0], 2))
            .await
            .unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, Some(near.id));
        assert!(hits[0].score >= hits[1].score);
        assert!(hits[0].payload.is_some());
    }

    #[tokio::test]
    async fn test_upsert_rejects_wrong_dimension() {
        let repo = InMemoryVectorRepository::new();
        repo.create_collection(&spec()).await.unwrap();

        let result = repo.upsert("users", vec![point(vec![1.0; 3])], true).await;
        assert!(matches!(result, Err(VectorError::Qdrant(_))));
        assert_eq!(repo.count("users").await, Some(0));
    }

    #[tokio::test]
    async fn test_missing_collection_is_an_error() {
        let repo = InMemoryVectorRepository::new();
        let result = repo.search("users", SearchQuery::new(vec![1.0, 0.0], 5)).await;
        assert!(result.is_err());
        assert_eq!(repo.count("users").await, None);
    }
}
