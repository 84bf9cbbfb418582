//! Handler tests for the user-context endpoint
//!
//! The router runs against the in-memory vector store and a deterministic
//! embedder, so these cover the full request pipeline without network:
//! - collection bootstrap and seeding
//! - request validation and method handling
//! - per-stage error responses

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_vector::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

const COLLECTION: &str = "users";

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Folds the bytes of the text into a fixed-size vector. Equal texts map to
/// equal vectors.
struct HashEmbedder;

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(
        &self,
        _model: EmbeddingModel,
        dimensions: u32,
        text: &str,
    ) -> VectorResult<Vec<f32>> {
        let mut vector = vec![0.0f32; dimensions as usize];
        for (i, byte) in text.bytes().enumerate() {
            vector[(i * 31 + byte as usize) % dimensions as usize] += 1.0;
        }
        Ok(vector)
    }
}

struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _: EmbeddingModel, _: u32, _: &str) -> VectorResult<Vec<f32>> {
        Err(VectorError::Embedding("OpenAI API error (401): invalid key".into()))
    }
}

/// Delegates to the in-memory store but fails every search
struct SearchFailingRepository(InMemoryVectorRepository);

#[async_trait]
impl VectorRepository for SearchFailingRepository {
    async fn collection_exists(&self, name: &str) -> VectorResult<bool> {
        self.0.collection_exists(name).await
    }

    async fn create_collection(&self, spec: &CollectionSpec) -> VectorResult<bool> {
        self.0.create_collection(spec).await
    }

    async fn upsert(&self, name: &str, points: Vec<Point>, wait: bool) -> VectorResult<usize> {
        self.0.upsert(name, points, wait).await
    }

    async fn search(&self, _: &str, _: SearchQuery) -> VectorResult<Vec<ScoredPayload>> {
        Err(VectorError::Qdrant("deadline exceeded".into()))
    }

    async fn health_check(&self) -> VectorResult<()> {
        Ok(())
    }
}

fn app_with<R: VectorRepository + 'static>(
    repo: Arc<R>,
    embedder: Arc<dyn EmbeddingProvider>,
) -> axum::Router {
    let service = UserContextService::new(repo, embedder, COLLECTION);
    handlers::router(Arc::new(service))
}

fn post_json(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/user-context")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_first_request_creates_and_seeds_collection() {
    let repo = Arc::new(InMemoryVectorRepository::new());
    let app = app_with(Arc::clone(&repo), Arc::new(HashEmbedder));

    let response = app
        .oneshot(post_json(json!({
            "name": "Grace",
            "user_context": "I build compilers and love Rust"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let recs: Vec<Recommendation> = json_body(response.into_body()).await;

    assert_eq!(repo.count(COLLECTION).await, Some(SAMPLE_PROFILES.len() + 1));
    assert!(!recs.is_empty() && recs.len() <= 5);
    assert!(recs.windows(2).all(|w| w[0].score >= w[1].score));

    // Identical vector ranks first
    assert_eq!(
        recs[0].user_context.as_deref(),
        Some("I build compilers and love Rust")
    );
    assert_eq!(recs[0].name.as_deref(), Some("Grace"));
    assert!(recs[0].tags.is_none());

    let seeded = recs.iter().find(|r| r.tags.is_some()).unwrap();
    assert!(seeded.name.as_deref().unwrap().starts_with("Sample User "));
    assert!(seeded.img_url.is_some());
}

#[tokio::test]
async fn test_same_context_twice_stores_two_points() {
    let repo = Arc::new(InMemoryVectorRepository::new());
    let app = app_with(Arc::clone(&repo), Arc::new(HashEmbedder));
    let body = json!({ "user_context": "weekend hiker and amateur astronomer" });

    let first = app.clone().oneshot(post_json(body.clone())).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first: Vec<Recommendation> = json_body(first.into_body()).await;

    let second = app.oneshot(post_json(body)).await.unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    let second: Vec<Recommendation> = json_body(second.into_body()).await;

    assert_eq!(repo.count(COLLECTION).await, Some(SAMPLE_PROFILES.len() + 2));

    let first_id = first[0].id.clone().unwrap();
    let matching: Vec<_> = second
        .iter()
        .filter(|r| r.user_context.as_deref() == Some("weekend hiker and amateur astronomer"))
        .collect();
    assert_eq!(matching.len(), 2);
    assert_ne!(matching[0].id, matching[1].id);
    assert!(second.iter().any(|r| r.id.as_deref() == Some(first_id.as_str())));
}

#[tokio::test]
async fn test_get_with_body_is_accepted() {
    let repo = Arc::new(InMemoryVectorRepository::new());
    let app = app_with(repo, Arc::new(HashEmbedder));

    let request = Request::builder()
        .method("GET")
        .uri("/user-context")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"user_context":"gardening"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_user_context_returns_400_without_side_effects() {
    let repo = Arc::new(InMemoryVectorRepository::new());
    let app = app_with(Arc::clone(&repo), Arc::new(HashEmbedder));

    let response = app
        .clone()
        .oneshot(post_json(json!({ "name": "nobody" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "user_context field is required in body");

    // No collection was created
    assert_eq!(repo.count(COLLECTION).await, None);

    let empty = Request::builder()
        .method("GET")
        .uri("/user-context")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(empty).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unsupported_method_returns_405() {
    let app = app_with(
        Arc::new(InMemoryVectorRepository::new()),
        Arc::new(HashEmbedder),
    );

    let request = Request::builder()
        .method("PUT")
        .uri("/user-context")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "Method not allowed");
}

#[tokio::test]
async fn test_embedding_failure_returns_500_and_writes_nothing() {
    let repo = Arc::new(InMemoryVectorRepository::new());
    repo.create_collection(&CollectionSpec::new(COLLECTION))
        .await
        .unwrap();
    let app = app_with(Arc::clone(&repo), Arc::new(FailingEmbedder));

    let response = app
        .oneshot(post_json(json!({ "user_context": "anything" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "Failed to generate embedding");
    assert!(body["details"].as_str().unwrap().contains("invalid key"));
    assert_eq!(repo.count(COLLECTION).await, Some(0));
}

#[tokio::test]
async fn test_seed_failure_returns_internal_server_error() {
    let repo = Arc::new(InMemoryVectorRepository::new());
    let app = app_with(Arc::clone(&repo), Arc::new(FailingEmbedder));

    let response = app
        .oneshot(post_json(json!({ "user_context": "anything" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn test_search_failure_keeps_upserted_point() {
    let inner = InMemoryVectorRepository::new();
    inner
        .create_collection(&CollectionSpec::new(COLLECTION))
        .await
        .unwrap();
    let repo = Arc::new(SearchFailingRepository(inner.clone()));
    let app = app_with(repo, Arc::new(HashEmbedder));

    let response = app
        .oneshot(post_json(json!({ "user_context": "chess and go" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "Failed to search Qdrant");
    assert_eq!(inner.count(COLLECTION).await, Some(1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_cold_start_seeds_once() {
    let repo = Arc::new(InMemoryVectorRepository::new());
    let app = app_with(Arc::clone(&repo), Arc::new(HashEmbedder));

    let requests = (0..8).map(|i| {
        let app = app.clone();
        tokio::spawn(async move {
            app.oneshot(post_json(json!({ "user_context": format!("request number {i}") })))
                .await
                .unwrap()
                .status()
        })
    });

    for status in futures::future::join_all(requests).await {
        assert_eq!(status.unwrap(), StatusCode::OK);
    }
    assert_eq!(repo.count(COLLECTION).await, Some(SAMPLE_PROFILES.len() + 8));
}
