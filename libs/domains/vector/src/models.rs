use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

/// Dimension every stored vector has.
pub const EMBEDDING_DIMENSION: u32 = 256;

/// Number of neighbours returned for a user context.
pub const SEARCH_LIMIT: u64 = 5;

/// Embedding model requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum EmbeddingModel {
    #[default]
    TextEmbedding3Small,
}

impl EmbeddingModel {
    pub fn model_name(&self) -> &'static str {
        match self {
            EmbeddingModel::TextEmbedding3Small => "text-embedding-3-small",
        }
    }
}

/// Distance metric for similarity calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum DistanceMetric {
    #[default]
    Cosine,
}

/// Collection schema. Dimension and metric are fixed once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSpec {
    pub name: String,
    pub dimension: u32,
    pub distance: DistanceMetric,
}

impl CollectionSpec {
    /// 256-dimensional cosine collection
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dimension: EMBEDDING_DIMENSION,
            distance: DistanceMetric::Cosine,
        }
    }
}

/// Payload stored alongside every point.
///
/// `id` mirrors the point id. Absent optional fields are not written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserPayload {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub user_context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// RFC 3339 timestamp of the write
    pub timestamp: String,
}

impl UserPayload {
    pub fn new(id: Uuid, user_context: impl Into<String>) -> Self {
        Self {
            id,
            name: None,
            user_context: user_context.into(),
            img_url: None,
            tags: None,
            url: None,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn with_img_url(mut self, img_url: impl Into<String>) -> Self {
        self.img_url = Some(img_url.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }
}

/// A vector point with payload
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub id: Uuid,
    pub vector: Vec<f32>,
    pub payload: UserPayload,
}

impl Point {
    /// Point whose payload id mirrors `id`
    pub fn new(id: Uuid, vector: Vec<f32>, payload: UserPayload) -> Self {
        Self {
            id,
            vector,
            payload: UserPayload { id, ..payload },
        }
    }
}

/// Nearest-neighbour query
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub vector: Vec<f32>,
    pub limit: u64,
    pub with_payload: bool,
}

impl SearchQuery {
    pub fn new(vector: Vec<f32>, limit: u64) -> Self {
        Self {
            vector,
            limit,
            with_payload: true,
        }
    }
}

/// Search hit as returned by the store, ordered by non-increasing score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPayload {
    pub id: Option<Uuid>,
    pub score: f32,
    pub payload: Option<Value>,
}

/// Request body of the user-context endpoint.
///
/// Fields are kept as raw JSON so a wrong type surfaces as a validation
/// error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UserContextRequest {
    /// Display name stored with the point
    #[schema(value_type = Option<String>)]
    pub name: Option<Value>,
    /// Free-text description to embed
    #[schema(value_type = String)]
    pub user_context: Option<Value>,
}

/// Validated user-context input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContextInput {
    pub name: Option<String>,
    pub user_context: String,
}

impl UserContextRequest {
    /// Accepts only a non-blank string `user_context`. A non-string `name`
    /// is dropped.
    pub fn validate(self) -> Option<UserContextInput> {
        let user_context = match self.user_context {
            Some(Value::String(s)) if !s.trim().is_empty() => s,
            _ => return None,
        };
        let name = match self.name {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };

        Some(UserContextInput { name, user_context })
    }
}

/// A similar profile returned to the caller.
///
/// Every field but `score` comes from the stored payload and is `null` when
/// missing or of an unexpected type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recommendation {
    pub id: Option<String>,
    pub img_url: Option<String>,
    pub name: Option<String>,
    pub tags: Option<Vec<String>>,
    pub url: Option<String>,
    pub user_context: Option<String>,
    pub score: f32,
}

impl Recommendation {
    /// Projects a search hit; hits without payload yield `None`.
    pub fn from_scored(hit: ScoredPayload) -> Option<Self> {
        // A non-object payload projects to an all-null record
        let stored: StoredPayload = serde_json::from_value(hit.payload?).unwrap_or_default();

        Some(Self {
            id: stored.id,
            img_url: stored.img_url,
            name: stored.name,
            tags: stored.tags,
            url: stored.url,
            user_context: stored.user_context,
            score: hit.score,
        })
    }
}

/// Payload as read back from the store.
///
/// Points may have been written by other producers, so each field decodes
/// on its own and a wrong type becomes `None`.
#[derive(Debug, Default, Deserialize)]
struct StoredPayload {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    user_context: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    img_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    url: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    tags: Option<Vec<String>>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Keeps the string elements of an array; anything else is `None`
fn lenient_tags<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}
