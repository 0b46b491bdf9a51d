//! In-memory long-poll queues.
//!
//! Each client slot pairs a FIFO with a `Notify`. Waiters register interest
//! before checking the queue, so an enqueue racing with the check still
//! wakes them.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};
use tokio::time::Instant;

use crate::domain::foundation::TokenId;
use crate::ports::{PollQueue, QueueError};

#[derive(Debug, Default)]
struct Slot {
    entries: VecDeque<String>,
    notify: Arc<Notify>,
}

/// Process-local poll queues for tests and single-node development.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPollQueue {
    slots: Arc<Mutex<HashMap<TokenId, Slot>>>,
}

impl InMemoryPollQueue {
    pub fn new() -> Self {
        Self::default()
    }

    async fn notifier(&self, token: &TokenId) -> Arc<Notify> {
        let mut slots = self.slots.lock().await;
        slots.entry(token.clone()).or_default().notify.clone()
    }

    async fn pop(&self, token: &TokenId) -> Option<String> {
        let mut slots = self.slots.lock().await;
        slots.get_mut(token).and_then(|slot| slot.entries.pop_front())
    }
}

#[async_trait]
impl PollQueue for InMemoryPollQueue {
    async fn enqueue(&self, token: &TokenId, payload: &str) -> Result<(), QueueError> {
        let mut slots = self.slots.lock().await;
        let slot = slots.entry(token.clone()).or_default();
        slot.entries.push_back(payload.to_string());
        slot.notify.notify_waiters();
        Ok(())
    }

    async fn len(&self, token: &TokenId) -> Result<u64, QueueError> {
        let slots = self.slots.lock().await;
        Ok(slots
            .get(token)
            .map(|slot| slot.entries.len() as u64)
            .unwrap_or(0))
    }

    async fn drain(&self, token: &TokenId) -> Result<Vec<String>, QueueError> {
        let mut slots = self.slots.lock().await;
        Ok(slots
            .get_mut(token)
            .map(|slot| slot.entries.drain(..).collect())
            .unwrap_or_default())
    }

    async fn wait_next(
        &self,
        token: &TokenId,
        timeout: Duration,
    ) -> Result<Option<String>, QueueError> {
        let deadline = Instant::now() + timeout;
        let notify = self.notifier(token).await;

        loop {
            let notified = notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(entry) = self.pop(token).await {
                return Ok(Some(entry));
            }

            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return Ok(None);
            }
        }
    }
}
