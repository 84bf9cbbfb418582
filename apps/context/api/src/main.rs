use std::sync::Arc;

use axum_helpers::server::{create_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_chat::{ChatService, OpenAIChatProvider};
use domain_vector::{OpenAIProvider, QdrantRepository, UserContextService};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    // One connection pool for both OpenAI endpoints
    let http = reqwest::Client::new();

    info!("Configuring Qdrant client for {}", config.qdrant.url);
    let repository = QdrantRepository::new(&config.qdrant)
        .map_err(|e| eyre::eyre!("Qdrant client setup failed: {}", e))?;

    let embedder = OpenAIProvider::with_client(http.clone(), config.openai.clone());
    let chat_provider = OpenAIChatProvider::with_client(http, config.openai.clone());

    let user_context = UserContextService::new(
        Arc::new(repository),
        Arc::new(embedder),
        config.qdrant.collection.clone(),
    );

    let state = AppState {
        user_context: Arc::new(user_context),
        chat: ChatService::new(Arc::new(chat_provider)),
        config,
    };

    // Build router with API routes
    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes, &state.config.server)?;

    // - /health: liveness check with app name/version
    // - /ready: readiness check that pings Qdrant
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    create_app(app, &state.config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("User context API shutdown complete");
    Ok(())
}
