//! HTTP DTOs for API client endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::chat::Message;

/// Body of `POST /api/room/:room`. Missing credentials simply fail
/// authentication.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostApiMessageRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// Query string of `GET /api/poll`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PollParams {
    pub id: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PollResponse {
    pub messages: Vec<Message>,
}
