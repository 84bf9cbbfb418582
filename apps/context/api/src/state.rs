//! Application state management.
//!
//! Holds the configuration and the domain services shared by every handler.

use std::sync::Arc;

use domain_chat::ChatService;
use domain_vector::{QdrantRepository, UserContextService, VectorRepository};

/// Shared application state.
///
/// Cloned per router; services sit behind `Arc` so clones are cheap.
pub struct AppState<R: VectorRepository = QdrantRepository> {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// Embed, store and search user contexts
    pub user_context: Arc<UserContextService<R>>,
    /// Relay for chat completions
    pub chat: ChatService,
}

impl<R: VectorRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            user_context: Arc::clone(&self.user_context),
            chat: self.chat.clone(),
        }
    }
}
