use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::error::ChatResult;
use crate::models::ChatCompletionRequest;
use crate::provider::ChatProvider;

/// Stateless relay to a chat completion provider
#[derive(Clone)]
pub struct ChatService {
    provider: Arc<dyn ChatProvider>,
}

impl ChatService {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    /// Validate the request, forward it, and return the completion unchanged
    pub async fn complete(&self, request: ChatCompletionRequest) -> ChatResult<Value> {
        let completion = request.into_completion()?;
        info!(
            model = %completion.model,
            max_tokens = %completion.max_tokens,
            messages = completion.messages.len(),
            "Requesting chat completion"
        );

        self.provider.complete(completion).await
    }
}
