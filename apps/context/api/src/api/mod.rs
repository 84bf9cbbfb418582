use axum::Router;
use domain_vector::VectorRepository;

use crate::state::AppState;

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Returns a stateless Router (all sub-routers have state already applied).
pub fn routes<R: VectorRepository + 'static>(state: &AppState<R>) -> Router {
    Router::new()
        .merge(domain_vector::handlers::router(state.user_context.clone()))
        .merge(domain_chat::handlers::router(state.chat.clone()))
}

/// Creates a router with the /ready endpoint that pings the vector store.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`.
pub fn ready_router<R: VectorRepository + 'static>(state: AppState<R>) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler::<R>))
        .with_state(state)
}
