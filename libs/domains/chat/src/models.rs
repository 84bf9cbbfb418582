use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::{ChatError, ChatResult};

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const MESSAGES_REQUIRED: &str = "Messages array is required";

/// Chat completion request body.
///
/// Fields are kept as raw JSON and forwarded to the provider exactly as
/// received; only `messages` is checked.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ChatCompletionRequest {
    /// Conversation so far, e.g. `[{"role": "user", "content": "Hi"}]`
    #[schema(value_type = Vec<Object>)]
    pub messages: Option<Value>,
    /// Defaults to `gpt-4`
    #[schema(value_type = Option<String>)]
    pub model: Option<Value>,
    /// Defaults to 1000
    #[schema(value_type = Option<u32>)]
    pub max_tokens: Option<Value>,
}

/// Body sent to the completion API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: Value,
    pub messages: Vec<Value>,
    pub max_tokens: Value,
}

impl ChatCompletionRequest {
    /// Requires `messages` to be a JSON array and fills in defaults.
    pub fn into_completion(self) -> ChatResult<CompletionRequest> {
        let messages = match self.messages {
            Some(Value::Array(messages)) => messages,
            _ => return Err(ChatError::Validation(MESSAGES_REQUIRED.to_string())),
        };

        Ok(CompletionRequest {
            model: self.model.unwrap_or_else(|| Value::from(DEFAULT_MODEL)),
            messages,
            max_tokens: self.max_tokens.unwrap_or_else(|| Value::from(DEFAULT_MAX_TOKENS)),
        })
    }
}
