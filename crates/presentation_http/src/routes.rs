//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Advisory endpoints
        .route("/v1/advisory", post(handlers::advisory::start_advisory))
        .route("/v1/chat", post(handlers::chat::follow_up))
        .with_state(state)
}
