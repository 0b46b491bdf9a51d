//! PollMessagesHandler - Long-poll for an API client's queued messages.
//!
//! A non-empty queue is drained in one atomic step. An empty queue is
//! waited on for at most the configured timeout, and the first entry to
//! arrive is returned. Expiry is an empty result, not an error.

use std::sync::Arc;
use std::time::Duration;

use crate::application::handlers::ingress::INVALID_TOKENS;
use crate::domain::chat::{ChatError, Message};
use crate::ports::{ApiClientDirectory, ApiCredentials, PollQueue};

/// Default long-poll wait.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct PollMessagesQuery {
    pub credentials: ApiCredentials,
}

pub struct PollMessagesHandler {
    directory: Arc<dyn ApiClientDirectory>,
    queue: Arc<dyn PollQueue>,
    timeout: Duration,
}

impl PollMessagesHandler {
    pub fn new(directory: Arc<dyn ApiClientDirectory>, queue: Arc<dyn PollQueue>) -> Self {
        Self {
            directory,
            queue,
            timeout: DEFAULT_POLL_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn handle(&self, query: PollMessagesQuery) -> Result<Vec<Message>, ChatError> {
        let token = &query.credentials.token_id;

        // 1. Credentials
        if !self.directory.authenticate(&query.credentials).await? {
            tracing::info!(token_id = %token, "Rejected poll credentials");
            return Err(ChatError::forbidden(INVALID_TOKENS));
        }

        // 2. Drain what is pending, or 3. wait for the next entry
        let raw = if self.queue.len(token).await? > 0 {
            self.queue.drain(token).await?
        } else {
            self.queue
                .wait_next(token, self.timeout)
                .await?
                .into_iter()
                .collect()
        };

        let messages: Vec<Message> = raw
            .iter()
            .filter_map(|payload| match Message::from_json(payload) {
                Ok(message) => Some(message),
                Err(e) => {
                    tracing::warn!(token_id = %token, error = %e, "Skipping undecodable queue entry");
                    None
                }
            })
            .collect();

        tracing::debug!(token_id = %token, count = messages.len(), "Poll completed");
        Ok(messages)
    }
}
