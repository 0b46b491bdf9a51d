//! HTTP handlers for API client endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{bad_request, handle_chat_error};
use crate::adapters::http::web::UNPARSEABLE_JSON;
use crate::application::handlers::ingress::{PostApiMessageCommand, PostApiMessageHandler};
use crate::application::handlers::poll::{PollMessagesHandler, PollMessagesQuery};
use crate::ports::ApiCredentials;

use super::dto::{PollParams, PollResponse, PostApiMessageRequest};

pub const EMPTY_BODY: &str = "Bad Request";
pub const MISSING_CREDENTIALS: &str = "Missing id or key";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ApiHandlers {
    post_handler: Arc<PostApiMessageHandler>,
    poll_handler: Arc<PollMessagesHandler>,
}

impl ApiHandlers {
    pub fn new(
        post_handler: Arc<PostApiMessageHandler>,
        poll_handler: Arc<PollMessagesHandler>,
    ) -> Self {
        Self {
            post_handler,
            poll_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/room/:room - Message from a credentialed client
pub async fn post_api_message(
    State(handlers): State<ApiHandlers>,
    Path(room): Path<String>,
    body: Bytes,
) -> Response {
    if body.is_empty() {
        return bad_request(EMPTY_BODY);
    }
    let req: PostApiMessageRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            tracing::debug!(room = %room, error = %e, "Rejected API message body");
            return bad_request(UNPARSEABLE_JSON);
        }
    };

    let cmd = PostApiMessageCommand {
        room,
        credentials: ApiCredentials::new(req.id, req.key),
        content: req.content,
    };

    match handlers.post_handler.handle(cmd).await {
        Ok(_) => (StatusCode::OK, "OK").into_response(),
        Err(e) => handle_chat_error(e),
    }
}

/// GET /api/poll?id=&key= - Long-poll the client's queue
pub async fn poll_messages(
    State(handlers): State<ApiHandlers>,
    Query(params): Query<PollParams>,
) -> Response {
    let (id, key) = match (params.id, params.key) {
        (Some(id), Some(key)) => (id, key),
        _ => return bad_request(MISSING_CREDENTIALS),
    };

    let query = PollMessagesQuery {
        credentials: ApiCredentials::new(id, key),
    };

    match handlers.poll_handler.handle(query).await {
        Ok(messages) => (StatusCode::OK, Json(PollResponse { messages })).into_response(),
        Err(e) => handle_chat_error(e),
    }
}
