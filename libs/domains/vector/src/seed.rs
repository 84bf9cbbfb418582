use std::sync::Arc;

use futures::future::try_join_all;
use tracing::info;
use uuid::Uuid;

use crate::embedding::EmbeddingProvider;
use crate::error::VectorResult;
use crate::models::{EMBEDDING_DIMENSION, EmbeddingModel, Point, UserPayload};
use crate::repository::VectorRepository;

/// A catalog entry written into a freshly created collection
#[derive(Debug, Clone, Copy)]
pub struct SampleProfile {
    pub context: &'static str,
    pub img_url: &'static str,
    pub tags: &'static [&'static str],
}

pub const SAMPLE_PROFILES: &[SampleProfile] = &[
    SampleProfile {
        context: "I'm a software engineer with 5 years of experience in web development. I specialize in React and Node.js, and I'm interested in learning more about machine learning and AI.",
        img_url: "https://images.unsplash.com/photo-1534972195531-d756b9bfa9f2?w=500&auto=format&fit=crop&q=60&ixlib=rb-4.0.3.jpg",
        tags: &[
            "software engineering",
            "web development",
            "react",
            "node.js",
            "machine learning",
            "AI",
        ],
    },
    SampleProfile {
        context: "I'm a data scientist working in healthcare. I have experience with Python, SQL, and machine learning models. I'm looking to improve my data visualization skills.",
        img_url: "https://images.unsplash.com/photo-1551288049-bebda4e38f71?w=500&auto=format&fit=crop&q=60&ixlib=rb-4.0.3.jpg",
        tags: &[
            "data science",
            "healthcare",
            "python",
            "sql",
            "machine learning",
            "data visualization",
        ],
    },
    SampleProfile {
        context: "I'm a UX designer with a background in psychology. I focus on creating accessible and user-friendly interfaces. I'm currently learning more about front-end development.",
        img_url: "https://images.unsplash.com/photo-1573496359142-b8d87734a5a2?w=500&auto=format&fit=crop&q=60&ixlib=rb-4.0.3.jpg",
        tags: &[
            "UX design",
            "psychology",
            "accessibility",
            "user interface",
            "front-end development",
        ],
    },
    SampleProfile {
        context: "I'm a product manager with experience in agile methodologies. I work with cross-functional teams to deliver digital products. I'm interested in learning more about technical aspects of development.",
        img_url: "https://images.unsplash.com/photo-1560250097-0b93528c311a?w=500&auto=format&fit=crop&q=60&ixlib=rb-4.0.3.jpg",
        tags: &[
            "product management",
            "agile",
            "cross-functional",
            "digital products",
            "technical development",
        ],
    },
    SampleProfile {
        context: "I'm a DevOps engineer specializing in cloud infrastructure. I work with AWS, Docker, and Kubernetes. I'm looking to improve my automation skills.",
        img_url: "https://images.unsplash.com/photo-1551434678-e076c223a692?w=500&auto=format&fit=crop&q=60&ixlib=rb-4.0.3.jpg",
        tags: &[
            "devops",
            "cloud infrastructure",
            "AWS",
            "docker",
            "kubernetes",
            "automation",
        ],
    },
];

/// Display name for a seeded profile: `Sample User <first 8 chars of id>`
pub fn sample_name(id: Uuid) -> String {
    let id = id.to_string();
    format!("Sample User {}", &id[..8])
}

/// Populates a new collection with [`SAMPLE_PROFILES`].
pub struct SeedLoader<R: VectorRepository> {
    repository: Arc<R>,
    embedder: Arc<dyn EmbeddingProvider>,
    collection: String,
}

impl<R: VectorRepository> SeedLoader<R> {
    pub fn new(
        repository: Arc<R>,
        embedder: Arc<dyn EmbeddingProvider>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            embedder,
            collection: collection.into(),
        }
    }

    /// Embeds every sample concurrently and writes them in one batch.
    ///
    /// Any embedding failure aborts before anything is written. Returns the
    /// number of points written.
    #[tracing::instrument(skip(self), fields(collection = %self.collection))]
    pub async fn seed(&self) -> VectorResult<usize> {
        let vectors = try_join_all(SAMPLE_PROFILES.iter().map(|profile| {
            self.embedder.embed(
                EmbeddingModel::TextEmbedding3Small,
                EMBEDDING_DIMENSION,
                profile.context,
            )
        }))
        .await?;

        let points: Vec<Point> = SAMPLE_PROFILES
            .iter()
            .zip(vectors)
            .map(|(profile, vector)| {
                let id = Uuid::new_v4();
                let payload = UserPayload::new(id, profile.context)
                    .with_name(Some(sample_name(id)))
                    .with_img_url(profile.img_url)
                    .with_tags(profile.tags.iter().map(|t| t.to_string()).collect());
                Point::new(id, vector, payload)
            })
            .collect();

        let written = self.repository.upsert(&self.collection, points, true).await?;

        info!("Successfully generated {} sample records", written);
        Ok(written)
    }
}
