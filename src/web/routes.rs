//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // API routes
        .route("/api/v1/repos", get(handlers::repos))
        .route("/api/v1/search", get(handlers::search))
        .route("/api/v1/excludes", get(handlers::excludes))
        .route("/api/v1/update", post(handlers::update))
        .route("/api/v1/github-webhook", post(handlers::github_webhook))
        .route("/health", get(handlers::health))
        // Add middleware
        .layer(cors)
        // Add state
        .with_state(state)
}
