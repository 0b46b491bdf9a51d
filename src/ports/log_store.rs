//! LogStore port - Append-only per-day chat log.

use async_trait::async_trait;

use crate::domain::chat::{ChatError, Message};
use crate::domain::chatlog::LogPartition;

/// Errors raised by log store adapters.
#[derive(Debug, thiserror::Error)]
pub enum LogStoreError {
    /// Storage backend could not be reached or rejected the command.
    #[error("Log store unavailable: {0}")]
    Unavailable(String),

    /// A stored record does not decode. Never masked.
    #[error("Corrupt log record {partition}#{index}: {reason}")]
    Corrupt {
        partition: String,
        index: u64,
        reason: String,
    },

    /// The message could not be serialized for storage.
    #[error("Cannot encode message: {0}")]
    Encode(String),
}

impl From<LogStoreError> for ChatError {
    fn from(err: LogStoreError) -> Self {
        ChatError::infrastructure(err.to_string())
    }
}

/// Port for the chat log.
///
/// Implementations must ensure:
/// - indices within a partition start at 0 and are contiguous
/// - entries are never deleted or reordered
/// - `range` never fails for a window that is merely out of bounds
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Append a message and return its index.
    async fn append(&self, partition: &LogPartition, message: &Message)
        -> Result<u64, LogStoreError>;

    /// Number of entries in the partition.
    async fn length(&self, partition: &LogPartition) -> Result<u64, LogStoreError>;

    /// Entries at `[start, end]` inclusive, truncated to what exists.
    /// Empty when `start > end` or `start` is past the end.
    async fn range(
        &self,
        partition: &LogPartition,
        start: u64,
        end: u64,
    ) -> Result<Vec<Message>, LogStoreError>;

    /// Single entry, or `None` if the index does not exist.
    async fn get(
        &self,
        partition: &LogPartition,
        index: u64,
    ) -> Result<Option<Message>, LogStoreError> {
        Ok(self.range(partition, index, index).await?.pop())
    }
}

/// Decode one stored record, reporting its position on failure.
pub(crate) fn decode_record(
    partition: &LogPartition,
    index: u64,
    raw: &str,
) -> Result<Message, LogStoreError> {
    Message::from_json(raw).map_err(|e| LogStoreError::Corrupt {
        partition: partition.to_string(),
        index,
        reason: e.to_string(),
    })
}
