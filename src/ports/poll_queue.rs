//! PollQueue port - Per-client durable queues behind long-poll.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::chat::ChatError;
use crate::domain::foundation::TokenId;

/// Errors raised by queue adapters.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Poll queue unavailable: {0}")]
    Unavailable(String),
}

impl From<QueueError> for ChatError {
    fn from(err: QueueError) -> Self {
        ChatError::infrastructure(err.to_string())
    }
}

/// Port for long-poll queues, one per API client.
///
/// Implementations must ensure:
/// - enqueue order is preserved per client
/// - `drain` removes exactly what it returns, atomically
/// - `wait_next` never outlives its timeout and suspends without spinning
#[async_trait]
pub trait PollQueue: Send + Sync {
    /// Append a serialized message to the client's queue.
    async fn enqueue(&self, token: &TokenId, payload: &str) -> Result<(), QueueError>;

    /// Number of pending entries.
    async fn len(&self, token: &TokenId) -> Result<u64, QueueError>;

    /// Remove and return every pending entry.
    async fn drain(&self, token: &TokenId) -> Result<Vec<String>, QueueError>;

    /// Pop the next entry, waiting up to `timeout` for one to arrive.
    /// `Ok(None)` means the timeout elapsed.
    async fn wait_next(
        &self,
        token: &TokenId,
        timeout: Duration,
    ) -> Result<Option<String>, QueueError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn PollQueue) {}
}
