//! REST handlers for the chat relay

use std::sync::Arc;

use axum::{Json, Router, body::Bytes, extract::State, routing::post};
use axum_helpers::errors::{
    ErrorResponse,
    handlers::method_not_allowed,
    responses::{BadRequestResponse, InternalServerErrorResponse, MethodNotAllowedResponse},
};
use serde_json::Value;
use utoipa::OpenApi;

use crate::error::ChatResult;
use crate::models::ChatCompletionRequest;
use crate::service::ChatService;

/// OpenAPI documentation for the chat API
#[derive(OpenApi)]
#[openapi(
    paths(chat_completion),
    components(
        schemas(ChatCompletionRequest, ErrorResponse),
        responses(BadRequestResponse, InternalServerErrorResponse, MethodNotAllowedResponse)
    ),
    tags(
        (name = "chat", description = "Chat completion relay")
    )
)]
pub struct ChatApiDoc;

/// Router exposing `POST /chat-completion`; other methods get a JSON 405.
pub fn router(service: ChatService) -> Router {
    Router::new()
        .route(
            "/chat-completion",
            post(chat_completion).fallback(method_not_allowed),
        )
        .with_state(Arc::new(service))
}

/// Forward a conversation to the completion API
///
/// Returns the provider's completion object unchanged.
#[utoipa::path(
    post,
    path = "/chat-completion",
    tag = "chat",
    request_body = ChatCompletionRequest,
    responses(
        (status = 200, description = "Completion object from the provider", content_type = "application/json"),
        (status = 400, response = BadRequestResponse),
        (status = 405, response = MethodNotAllowedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn chat_completion(
    State(service): State<Arc<ChatService>>,
    body: Bytes,
) -> ChatResult<Json<Value>> {
    let request = parse_request(&body);
    let completion = service.complete(request).await?;
    Ok(Json(completion))
}

/// A body that is not a JSON object counts as having no messages.
fn parse_request(body: &[u8]) -> ChatCompletionRequest {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::debug!("Unreadable chat body: {}", e);
        ChatCompletionRequest::default()
    })
}
