use crate::{env_or_default, env_parse_or, env_required, ConfigError, FromEnv};

/// gRPC endpoint of a local Qdrant instance
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";
pub const DEFAULT_COLLECTION: &str = "users";

/// Qdrant connection configuration.
///
/// `url` must point at the gRPC port (6334 by default), not the REST port
/// 6333. A REST URL connects but fails on the first call.
#[derive(Clone)]
pub struct QdrantConfig {
    pub url: String,
    pub api_key: String,
    pub timeout_secs: u64,
    pub collection: String,
}

impl QdrantConfig {
    pub fn new(url: String, api_key: String) -> Self {
        Self {
            url,
            api_key,
            timeout_secs: 30,
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_collection(mut self, collection: String) -> Self {
        self.collection = collection;
        self
    }

    /// Whether `url` targets Qdrant's REST port instead of gRPC
    pub fn uses_rest_port(&self) -> bool {
        let authority = self
            .url
            .split("://")
            .last()
            .unwrap_or_default()
            .split('/')
            .next()
            .unwrap_or_default();
        authority.ends_with(":6333")
    }
}

impl std::fmt::Debug for QdrantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QdrantConfig")
            .field("url", &self.url)
            .field("api_key", &"***")
            .field("timeout_secs", &self.timeout_secs)
            .field("collection", &self.collection)
            .finish()
    }
}

impl FromEnv for QdrantConfig {
    /// Requires QDRANT_API_KEY. QDRANT_URL, QDRANT_TIMEOUT_SECS and
    /// QDRANT_COLLECTION fall back to local defaults.
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = env_required("QDRANT_API_KEY")?;
        let url = env_or_default("QDRANT_URL", DEFAULT_QDRANT_URL);
        let timeout_secs = env_parse_or("QDRANT_TIMEOUT_SECS", 30u64)?;
        let collection = env_or_default("QDRANT_COLLECTION", DEFAULT_COLLECTION);

        Ok(Self::new(url, api_key)
            .with_timeout(timeout_secs)
            .with_collection(collection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uses_rest_port() {
        let rest = |url: &str| QdrantConfig::new(url.to_string(), "k".to_string()).uses_rest_port();
        assert!(rest("http://localhost:6333"));
        assert!(rest("https://qdrant.example.com:6333/"));
        assert!(!rest(DEFAULT_QDRANT_URL));
        assert!(!rest("https://xyz.cloud.qdrant.io:6334"));
        assert!(!rest("http://host-6333.internal:6334"));
    }

    #[test]
    fn test_qdrant_config_defaults() {
        temp_env::with_vars(
            [
                ("QDRANT_API_KEY", Some("qd-key")),
                ("QDRANT_URL", None::<&str>),
                ("QDRANT_TIMEOUT_SECS", None::<&str>),
                ("QDRANT_COLLECTION", None::<&str>),
            ],
            || {
                let config = QdrantConfig::from_env().unwrap();
                assert_eq!(config.url, DEFAULT_QDRANT_URL);
                assert_eq!(config.timeout_secs, 30);
                assert_eq!(config.collection, "users");
            },
        );
    }

    #[test]
    fn test_qdrant_config_missing_api_key() {
        temp_env::with_var_unset("QDRANT_API_KEY", || {
            let err = QdrantConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("QDRANT_API_KEY"));
        });
    }

    #[test]
    fn test_qdrant_config_invalid_timeout() {
        temp_env::with_vars(
            [
                ("QDRANT_API_KEY", Some("qd-key")),
                ("QDRANT_TIMEOUT_SECS", Some("soon")),
            ],
            || {
                let err = QdrantConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("QDRANT_TIMEOUT_SECS"));
            },
        );
    }

    #[test]
    fn test_qdrant_config_overrides() {
        temp_env::with_vars(
            [
                ("QDRANT_API_KEY", Some("qd-key")),
                ("QDRANT_URL", Some("https://cluster.cloud.qdrant.io:6334")),
                ("QDRANT_TIMEOUT_SECS", Some("5")),
                ("QDRANT_COLLECTION", Some("profiles")),
            ],
            || {
                let config = QdrantConfig::from_env().unwrap();
                assert_eq!(config.url, "https://cluster.cloud.qdrant.io:6334");
                assert_eq!(config.timeout_secs, 5);
                assert_eq!(config.collection, "profiles");
            },
        );
    }
}
