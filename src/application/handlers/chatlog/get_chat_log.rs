//! GetChatLogHandler - Query handler for windowed room history.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::chat::{ChatError, PublicLogEntry};
use crate::domain::chatlog::{
    LogPartition, LogWindow, RequestedDate, RetentionPolicy, RoomAccess, WindowRequest,
};
use crate::domain::foundation::{Clock, DATE_FORMAT};
use crate::ports::LogStore;

/// Message returned when a date falls outside the retention window.
pub const RETENTION_REFUSAL: &str = "Dark History Covered";

/// Read-side rules shared by the history handlers.
#[derive(Debug, Clone)]
pub struct ChatLogPolicy {
    pub access: RoomAccess,
    pub retention: RetentionPolicy,
    /// Default window size for embedded views.
    pub embedded_limit: u64,
}

impl ChatLogPolicy {
    pub fn new(access: RoomAccess, retention: RetentionPolicy, embedded_limit: u64) -> Self {
        Self {
            access,
            retention,
            embedded_limit,
        }
    }
}

/// Query for one room's log on one day.
#[derive(Debug, Clone, Default)]
pub struct GetChatLogQuery {
    pub room: String,
    /// `today` or `YYYY-MM-DD`.
    pub date: String,
    pub last: Option<String>,
    pub limit: Option<String>,
    pub embedded: bool,
}

/// Everything a history view needs, JSON or HTML.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatLogView {
    pub room: String,
    pub date: NaiveDate,
    pub title: String,
    pub entries: Vec<PublicLogEntry>,
    /// Index the next appended message will receive.
    pub next_id: u64,
    /// Only today's log streams live updates.
    pub enable_ws: bool,
    pub rooms: Vec<String>,
    /// Recent dates, newest first, for navigation.
    pub dates: Vec<String>,
    pub embedded: bool,
    /// Effective window size.
    pub limit: u64,
}

/// Handler for history retrieval.
pub struct GetChatLogHandler {
    store: Arc<dyn LogStore>,
    clock: Arc<dyn Clock>,
    policy: ChatLogPolicy,
}

impl GetChatLogHandler {
    pub fn new(store: Arc<dyn LogStore>, clock: Arc<dyn Clock>, policy: ChatLogPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    pub async fn handle(&self, query: GetChatLogQuery) -> Result<ChatLogView, ChatError> {
        // 1. Room must be public, before anything touches storage
        self.policy.access.authorize(&query.room)?;

        // 2. Resolve the date and apply retention
        let requested = RequestedDate::parse(&query.date)?;
        let today = self.clock.today();
        let date = requested.resolve(today);
        if !self.policy.retention.permits(today, date) {
            tracing::debug!(room = %query.room, %date, "Refused date outside retention");
            return Err(ChatError::forbidden(RETENTION_REFUSAL));
        }

        // 3. Window arguments
        let request = WindowRequest::parse(
            query.last.as_deref(),
            query.limit.as_deref(),
            query.embedded,
        )?;

        // 4. Read the window
        let partition = LogPartition::new(query.room.clone(), date);
        let mlen = self.store.length(&partition).await?;
        let window = LogWindow::compute(mlen, &request, self.policy.embedded_limit);

        let entries = match window.bounds() {
            Some((start, end)) => self
                .store
                .range(&partition, start, end)
                .await?
                .into_iter()
                .zip(start..)
                .map(|(message, id)| message.into_public(id))
                .collect(),
            None => Vec::new(),
        };

        let limit = request.limit.map(|l| l as u64).unwrap_or(if query.embedded {
            self.policy.embedded_limit
        } else {
            mlen
        });

        tracing::debug!(
            partition = %partition,
            mlen,
            start = window.start,
            end = window.end,
            "Served chat log window"
        );

        Ok(ChatLogView {
            title: format!("#{} @ {}", query.room, date.format(DATE_FORMAT)),
            room: query.room,
            date,
            entries,
            next_id: mlen,
            enable_ws: requested.is_today(),
            rooms: self.policy.access.public_rooms(),
            dates: self
                .policy
                .retention
                .recent_dates(today)
                .iter()
                .map(|d| d.format(DATE_FORMAT).to_string())
                .collect(),
            embedded: query.embedded,
            limit,
        })
    }
}
