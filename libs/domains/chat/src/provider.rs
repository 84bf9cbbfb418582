use async_trait::async_trait;
use core_config::openai::OpenAIConfig;
use reqwest::Client;
use serde_json::Value;

use crate::error::{ChatError, ChatResult};
use crate::models::CompletionRequest;

/// Trait for chat completion providers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Returns the provider's completion object unmodified
    async fn complete(&self, request: CompletionRequest) -> ChatResult<Value>;
}

/// OpenAI chat completions provider
pub struct OpenAIChatProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIChatProvider {
    pub fn new(config: OpenAIConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Reuse an existing connection pool
    pub fn with_client(client: Client, config: OpenAIConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ChatProvider for OpenAIChatProvider {
    #[tracing::instrument(skip(self, request), fields(model = %request.model, messages = request.messages.len()))]
    async fn complete(&self, request: CompletionRequest) -> ChatResult<Value> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ChatError::Provider(format!(
                "OpenAI API error ({}): {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}
