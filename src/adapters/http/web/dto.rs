//! HTTP DTOs for the web form endpoint.

use serde::{Deserialize, Serialize};

/// Body of `POST /room/:room`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostWebMessageRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
}

/// `{"msg": "OK"}`
#[derive(Debug, Clone, Serialize)]
pub struct MessageAccepted {
    pub msg: &'static str,
}

impl Default for MessageAccepted {
    fn default() -> Self {
        Self { msg: "OK" }
    }
}
