//! HTTP routes for the web form endpoint.

use axum::{routing::post, Router};

use super::handlers::{post_web_message, WebHandlers};

pub fn web_routes(handlers: WebHandlers) -> Router {
    Router::new()
        .route("/room/:room", post(post_web_message))
        .with_state(handlers)
}
