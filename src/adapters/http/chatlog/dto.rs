//! HTTP DTOs for history endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::chatlog::{ChatLogView, LogEntryView};
use crate::domain::foundation::DATE_FORMAT;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Query string of `GET /log/:room/:date`.
///
/// Numeric arguments stay raw so the window rules can reject them with a
/// field-specific message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatLogParams {
    #[serde(default)]
    pub last: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub json: Option<String>,
    #[serde(default)]
    pub embedded: Option<String>,
}

impl ChatLogParams {
    /// `?json=<anything non-empty>` selects the JSON feed.
    pub fn wants_json(&self) -> bool {
        self.json.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// `?embedded` counts even without a value.
    pub fn is_embedded(&self) -> bool {
        self.embedded.is_some()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Config block embedded in the history page for the client script.
#[derive(Debug, Clone, Serialize)]
pub struct ChatLogPageConfig {
    pub title: String,
    pub room: String,
    pub date: String,
    pub next_id: u64,
    pub enable_ws: bool,
    pub rooms: Vec<String>,
    pub dates: Vec<String>,
    pub basepath: String,
    pub embedded: bool,
    pub limit: u64,
}

impl ChatLogPageConfig {
    pub fn new(view: &ChatLogView, basepath: &str) -> Self {
        Self {
            title: view.title.clone(),
            room: view.room.clone(),
            date: view.date.format(DATE_FORMAT).to_string(),
            next_id: view.next_id,
            enable_ws: view.enable_ws,
            rooms: view.rooms.clone(),
            dates: view.dates.clone(),
            basepath: basepath.to_string(),
            embedded: view.embedded,
            limit: view.limit,
        }
    }
}

/// Fields shown on a permalink page.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntryPage {
    pub id: u64,
    pub title: String,
    pub time: String,
    pub content: String,
}

impl From<&LogEntryView> for LogEntryPage {
    fn from(view: &LogEntryView) -> Self {
        Self {
            id: view.id,
            title: view.title.clone(),
            time: view.time.clone(),
            content: view.content().to_string(),
        }
    }
}
