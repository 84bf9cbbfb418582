use core_config::{
    AppInfo, FromEnv, app_info, openai::OpenAIConfig, qdrant::QdrantConfig, server::ServerConfig,
};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub openai: OpenAIConfig,
    pub qdrant: QdrantConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let openai = OpenAIConfig::from_env()?; // Required - will fail if OPENAI_API_KEY is not set
        let qdrant = QdrantConfig::from_env()?; // Required - will fail if QDRANT_API_KEY is not set
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080

        Ok(Self {
            app: app_info!(),
            openai,
            qdrant,
            server,
            environment,
        })
    }
}
