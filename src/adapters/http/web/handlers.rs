//! HTTP handlers for the web form endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{bad_request, handle_chat_error};
use crate::application::handlers::ingress::{PostWebMessageCommand, PostWebMessageHandler};

use super::dto::{MessageAccepted, PostWebMessageRequest};

/// Reply to a body that is not a JSON object.
pub const UNPARSEABLE_JSON: &str = "Unable to parse JSON.";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct WebHandlers {
    post_handler: Arc<PostWebMessageHandler>,
}

impl WebHandlers {
    pub fn new(post_handler: Arc<PostWebMessageHandler>) -> Self {
        Self { post_handler }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /room/:room - Message typed into the web page
///
/// The body is decoded by hand so malformed JSON gets the relay's own
/// error body instead of the extractor rejection.
pub async fn post_web_message(
    State(handlers): State<WebHandlers>,
    Path(room): Path<String>,
    body: Bytes,
) -> Response {
    let req: PostWebMessageRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            tracing::debug!(room = %room, error = %e, "Rejected web message body");
            return bad_request(UNPARSEABLE_JSON);
        }
    };

    let cmd = PostWebMessageCommand {
        room,
        nickname: req.nickname,
        content: req.content,
    };

    match handlers.post_handler.handle(cmd).await {
        Ok(_) => (StatusCode::OK, Json(MessageAccepted::default())).into_response(),
        Err(e) => handle_chat_error(e),
    }
}
