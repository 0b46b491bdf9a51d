//! HTTP handlers for history endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};

use crate::adapters::http::error::handle_chat_error;
use crate::application::handlers::chatlog::{
    GetChatLogHandler, GetChatLogQuery, GetLogEntryHandler, GetLogEntryQuery,
};
use crate::domain::chat::ChatError;

use super::dto::{ChatLogParams, LogEntryPage};
use super::html::{render_chat_log, render_log_entry};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ChatLogHandlers {
    log_handler: Arc<GetChatLogHandler>,
    entry_handler: Arc<GetLogEntryHandler>,
    default_room: String,
    basepath: String,
}

impl ChatLogHandlers {
    pub fn new(
        log_handler: Arc<GetChatLogHandler>,
        entry_handler: Arc<GetLogEntryHandler>,
        default_room: impl Into<String>,
        basepath: impl Into<String>,
    ) -> Self {
        Self {
            log_handler,
            entry_handler,
            default_room: default_room.into(),
            basepath: basepath.into(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET / - Today's log of the default room
pub async fn redirect_to_default(State(handlers): State<ChatLogHandlers>) -> Redirect {
    Redirect::to(&format!(
        "{}/log/{}/today",
        handlers.basepath, handlers.default_room
    ))
}

/// GET /log/:room/:date - Windowed history, HTML or JSON
pub async fn get_chat_log(
    State(handlers): State<ChatLogHandlers>,
    Path((room, date)): Path<(String, String)>,
    Query(params): Query<ChatLogParams>,
) -> Response {
    let query = GetChatLogQuery {
        room,
        date,
        embedded: params.is_embedded(),
        last: params.last.clone(),
        limit: params.limit.clone(),
    };

    let view = match handlers.log_handler.handle(query).await {
        Ok(view) => view,
        Err(e) => return handle_chat_error(e),
    };

    if params.wants_json() {
        return (StatusCode::OK, Json(view.entries)).into_response();
    }

    match render_chat_log(&view, &handlers.basepath) {
        Ok(page) => (StatusCode::OK, Html(page)).into_response(),
        Err(e) => handle_chat_error(ChatError::infrastructure(e.to_string())),
    }
}

/// GET /log/:room/:date/:id - One stored message
pub async fn get_log_entry(
    State(handlers): State<ChatLogHandlers>,
    Path((room, date, id)): Path<(String, String, String)>,
) -> Response {
    let query = GetLogEntryQuery { room, date, id };

    match handlers.entry_handler.handle(query).await {
        Ok(view) => {
            let page = LogEntryPage::from(&view);
            (StatusCode::OK, Html(render_log_entry(&page))).into_response()
        }
        Err(e) => handle_chat_error(e),
    }
}
