//! Readiness check against the vector store.

use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use domain_vector::VectorRepository;

/// Readiness check endpoint that pings Qdrant.
pub async fn ready_handler<R: VectorRepository>(State(state): State<AppState<R>>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "qdrant",
        Box::pin(async {
            state
                .user_context
                .health_check()
                .await
                .map_err(|e| format!("Qdrant ping failed: {}", e))
        }),
    )];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}
