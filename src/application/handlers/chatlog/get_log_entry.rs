//! GetLogEntryHandler - Permalink lookup of one stored message.
//!
//! Unlike the bulk feed, a permalink shows the stored record as-is: no
//! projection is applied.

use std::sync::Arc;

use crate::domain::chat::{ChatError, Message};
use crate::domain::chatlog::{LogPartition, RequestedDate, RoomAccess};
use crate::domain::foundation::{Clock, ValidationError};
use crate::ports::LogStore;

/// Query for `/log/{room}/{date}/{id}`.
#[derive(Debug, Clone)]
pub struct GetLogEntryQuery {
    pub room: String,
    pub date: String,
    pub id: String,
}

/// A stored message and the fields its page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntryView {
    pub id: u64,
    pub title: String,
    pub time: String,
    pub message: Message,
}

impl LogEntryView {
    pub fn content(&self) -> &str {
        self.message.content()
    }
}

pub struct GetLogEntryHandler {
    store: Arc<dyn LogStore>,
    clock: Arc<dyn Clock>,
    access: RoomAccess,
}

impl GetLogEntryHandler {
    pub fn new(store: Arc<dyn LogStore>, clock: Arc<dyn Clock>, access: RoomAccess) -> Self {
        Self {
            store,
            clock,
            access,
        }
    }

    pub async fn handle(&self, query: GetLogEntryQuery) -> Result<LogEntryView, ChatError> {
        self.access.authorize(&query.room)?;

        let date = RequestedDate::parse(&query.date)?.resolve(self.clock.today());
        let id: u64 = query
            .id
            .trim()
            .parse()
            .map_err(|_| ValidationError::not_non_negative("id", &query.id))?;

        let partition = LogPartition::new(query.room, date);
        let message = self
            .store
            .get(&partition, id)
            .await?
            .ok_or_else(|| ChatError::not_found("text not found"))?;

        Ok(LogEntryView {
            id,
            title: format!("Text from {}", message.sender()),
            time: format!("{} {}", message.date(), message.time()),
            message,
        })
    }
}
