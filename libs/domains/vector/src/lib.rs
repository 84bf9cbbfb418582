//! Vector Domain Library
//!
//! Stores free-text user contexts as embeddings in Qdrant and answers each
//! write with the most similar stored profiles.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────┐
//! │ UserContextService │  ← validate, ensure collection, embed, upsert, search
//! └─────────┬──────────┘
//!           │            ┌──────────────┐
//!           ├───────────►│  SeedLoader  │  ← fills a newly created collection
//!           │            └──────┬───────┘
//! ┌─────────▼────────┐   ┌──────▼────────────┐
//! │ VectorRepository │   │ EmbeddingProvider │
//! │     (trait)      │   │      (trait)      │
//! └─────────┬────────┘   └──────┬────────────┘
//!           │                   │
//!   QdrantRepository      OpenAIProvider
//!   InMemoryVectorRepository
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use core_config::{FromEnv, openai::OpenAIConfig, qdrant::QdrantConfig};
//! use domain_vector::{OpenAIProvider, QdrantRepository, UserContextService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let qdrant = QdrantConfig::from_env()?;
//! let repository = Arc::new(QdrantRepository::new(&qdrant)?);
//! let embedder = Arc::new(OpenAIProvider::new(OpenAIConfig::from_env()?));
//!
//! let service = UserContextService::new(repository, embedder, qdrant.collection.clone());
//! let app = domain_vector::handlers::router(Arc::new(service));
//! # Ok(())
//! # }
//! ```

pub mod embedding;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod qdrant;
pub mod repository;
pub mod seed;
pub mod service;

// Re-export commonly used types
pub use embedding::{EmbeddingProvider, OpenAIProvider};
pub use error::{Stage, VectorError, VectorResult};
pub use handlers::UserContextApiDoc;
pub use memory::InMemoryVectorRepository;
pub use models::{
    CollectionSpec, DistanceMetric, EMBEDDING_DIMENSION, EmbeddingModel, Point, Recommendation,
    SEARCH_LIMIT, ScoredPayload, SearchQuery, UserContextRequest, UserPayload,
};
pub use qdrant::QdrantRepository;
pub use repository::VectorRepository;
pub use seed::{SAMPLE_PROFILES, SampleProfile, SeedLoader};
pub use service::UserContextService;
