//! Chat Domain Library
//!
//! A stateless relay: validates a chat request, applies defaults and forwards
//! the messages untouched to a completion provider.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use core_config::{FromEnv, openai::OpenAIConfig};
//! use domain_chat::{ChatService, OpenAIChatProvider};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = OpenAIChatProvider::new(OpenAIConfig::from_env()?);
//! let app = domain_chat::handlers::router(ChatService::new(Arc::new(provider)));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod provider;
pub mod service;

pub use error::{ChatError, ChatResult};
pub use handlers::ChatApiDoc;
pub use models::{ChatCompletionRequest, CompletionRequest, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
pub use provider::{ChatProvider, OpenAIChatProvider};
pub use service::ChatService;
