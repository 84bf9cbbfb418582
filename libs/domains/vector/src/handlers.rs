//! REST handlers for the user-context endpoint

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::post,
};
use axum_helpers::errors::{
    ErrorResponse,
    handlers::method_not_allowed,
    responses::{BadRequestResponse, InternalServerErrorResponse, MethodNotAllowedResponse},
};
use utoipa::OpenApi;

use crate::error::VectorResult;
use crate::models::{Recommendation, UserContextRequest};
use crate::repository::VectorRepository;
use crate::service::UserContextService;

/// OpenAPI documentation for the user-context API
#[derive(OpenApi)]
#[openapi(
    paths(user_context),
    components(
        schemas(UserContextRequest, Recommendation, ErrorResponse),
        responses(BadRequestResponse, InternalServerErrorResponse, MethodNotAllowedResponse)
    ),
    tags(
        (name = "user-context", description = "Store a user context and find similar profiles")
    )
)]
pub struct UserContextApiDoc;

/// Router exposing `/user-context` for GET and POST; other methods get a
/// JSON 405.
pub fn router<R: VectorRepository + 'static>(service: Arc<UserContextService<R>>) -> Router {
    Router::new()
        .route(
            "/user-context",
            post(user_context::<R>)
                .get(user_context::<R>)
                .fallback(method_not_allowed),
        )
        .with_state(service)
}

/// Record a user context and return up to five similar profiles
///
/// The body is read as JSON regardless of method. A missing, unparsable or
/// non-object body is treated as having no `user_context`.
#[utoipa::path(
    method(post, get),
    path = "/user-context",
    tag = "user-context",
    request_body = UserContextRequest,
    responses(
        (status = 200, description = "Most similar profiles, best first", body = Vec<Recommendation>),
        (status = 400, response = BadRequestResponse),
        (status = 405, response = MethodNotAllowedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn user_context<R: VectorRepository>(
    State(service): State<Arc<UserContextService<R>>>,
    body: Bytes,
) -> VectorResult<Json<Vec<Recommendation>>> {
    let request = serde_json::from_slice::<UserContextRequest>(&body).unwrap_or_else(|e| {
        tracing::debug!("Unreadable user-context body: {}", e);
        UserContextRequest::default()
    });

    let recommendations = service.record_and_recommend(request).await?;
    Ok(Json(recommendations))
}
