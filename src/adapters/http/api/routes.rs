//! HTTP routes for API client endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{poll_messages, post_api_message, ApiHandlers};

pub fn api_routes(handlers: ApiHandlers) -> Router {
    Router::new()
        .route("/api/room/:room", post(post_api_message))
        .route("/api/poll", get(poll_messages))
        .with_state(handlers)
}
