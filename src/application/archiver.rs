//! ChatArchiver - Background service that persists and fans out ingress.
//!
//! Subscribes to the ingress channel. For each message:
//! 1. append to the `(room, date)` log partition
//! 2. republish the payload on the room channel (live streams)
//! 3. enqueue the payload for every registered API client (long-poll)
//!
//! ## Graceful Shutdown
//!
//! `run` listens on a watch channel and releases its subscription when
//! told to stop. Losing the bus ends the run with `UpstreamDisconnected`.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::chat::{ChatError, Message};
use crate::domain::chatlog::LogPartition;
use crate::domain::relay::{BusChannel, BusEvent};
use crate::ports::{ApiClientDirectory, LogStore, MessageBus, PollQueue};

/// Outcome of archiving one bus payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// Stored at this index and fanned out.
    Archived { partition: String, index: u64 },
    /// Not a usable message; logged and dropped.
    Skipped,
}

pub struct ChatArchiver {
    bus: Arc<dyn MessageBus>,
    store: Arc<dyn LogStore>,
    queue: Arc<dyn PollQueue>,
    directory: Arc<dyn ApiClientDirectory>,
}

impl ChatArchiver {
    pub fn new(
        bus: Arc<dyn MessageBus>,
        store: Arc<dyn LogStore>,
        queue: Arc<dyn PollQueue>,
        directory: Arc<dyn ApiClientDirectory>,
    ) -> Self {
        Self {
            bus,
            store,
            queue,
            directory,
        }
    }

    /// Run until shutdown is signalled or the bus goes away.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<(), ChatError> {
        let mut subscription = self.bus.subscribe(&BusChannel::Ingress).await?;
        tracing::info!(channel = %BusChannel::Ingress, "Archiver subscribed");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        subscription.unsubscribe();
                        tracing::info!("Archiver stopped");
                        return Ok(());
                    }
                }

                event = subscription.next_event() => {
                    match event {
                        Some(BusEvent::Message(payload)) => {
                            if let Err(e) = self.archive(&payload).await {
                                tracing::error!(error = %e, "Failed to archive message");
                            }
                        }
                        Some(BusEvent::SubscribedAck) => {
                            tracing::debug!("Archiver subscription confirmed");
                        }
                        Some(BusEvent::Disconnected) | None => {
                            tracing::error!("Archiver lost the bus");
                            return Err(ChatError::UpstreamDisconnected);
                        }
                    }
                }
            }
        }
    }

    /// Archive one ingress payload.
    ///
    /// Log append failures abort before any fan-out. A failed enqueue for
    /// one client is logged and does not stop the others.
    pub async fn archive(&self, payload: &str) -> Result<ArchiveOutcome, ChatError> {
        let message = match Message::from_json(payload) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping undecodable ingress payload");
                return Ok(ArchiveOutcome::Skipped);
            }
        };
        let date = match message.partition_date() {
            Ok(date) => date,
            Err(e) => {
                tracing::warn!(room = %message.room(), error = %e, "Skipping message with bad date");
                return Ok(ArchiveOutcome::Skipped);
            }
        };

        let partition = LogPartition::new(message.room(), date);
        let index = self.store.append(&partition, &message).await?;

        self.bus
            .publish(&BusChannel::room(message.room()), payload)
            .await?;

        for token in self.directory.token_ids().await? {
            if let Err(e) = self.queue.enqueue(&token, payload).await {
                tracing::warn!(token_id = %token, error = %e, "Failed to enqueue for client");
            }
        }

        tracing::debug!(partition = %partition, index, "Archived message");
        Ok(ArchiveOutcome::Archived {
            partition: partition.key(),
            index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::bus::InMemoryMessageBus;
    use crate::adapters::clients::InMemoryClientDirectory;
    use crate::adapters::log_store::InMemoryLogStore;
    use crate::adapters::poll_queue::InMemoryPollQueue;
    use crate::domain::chat::{ChannelType, MessageType};
    use crate::domain::foundation::TokenId;
    use chrono::NaiveDate;
    use std::time::Duration;

    struct Fixture {
        bus: Arc<InMemoryMessageBus>,
        store: InMemoryLogStore,
        queue: InMemoryPollQueue,
        archiver: Arc<ChatArchiver>,
    }

    async fn fixture() -> Fixture {
        let bus = Arc::new(InMemoryMessageBus::new());
        let store = InMemoryLogStore::new();
        let queue = InMemoryPollQueue::new();
        let directory = InMemoryClientDirectory::new();
        directory.register("bot-a", "A", "ka").await;
        directory.register("bot-b", "B", "kb").await;
        let archiver = Arc::new(ChatArchiver::new(
            bus.clone(),
            Arc::new(store.clone()),
            Arc::new(queue.clone()),
            Arc::new(directory),
        ));
        Fixture {
            bus,
            store,
            queue,
            archiver,
        }
    }

    fn payload(room: &str, content: &str) -> String {
        Message::new(
            ChannelType::Xmpp,
            "alice",
            room,
            content,
            MessageType::Text,
            "2024-03-10",
            "10:00:00",
        )
        .to_json()
        .unwrap()
    }

    fn partition(room: &str) -> LogPartition {
        LogPartition::new(room, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap())
    }

    #[tokio::test]
    async fn archive_appends_republishes_and_enqueues() {
        let f = fixture().await;
        let sent = payload("rust", "hello");

        let outcome = f.archiver.archive(&sent).await.unwrap();

        assert_eq!(
            outcome,
            ArchiveOutcome::Archived {
                partition: "fishroom:log:rust:2024-03-10".into(),
                index: 0
            }
        );
        assert_eq!(f.store.length(&partition("rust")).await.unwrap(), 1);
        assert_eq!(f.bus.published_on(&BusChannel::room("rust")).await, vec![sent.clone()]);
        for token in ["bot-a", "bot-b"] {
            assert_eq!(f.queue.drain(&TokenId::new(token)).await.unwrap(), vec![sent.clone()]);
        }
    }

    #[tokio::test]
    async fn indices_are_contiguous_per_partition() {
        let f = fixture().await;
        for i in 0..3 {
            f.archiver.archive(&payload("rust", &i.to_string())).await.unwrap();
        }
        f.archiver.archive(&payload("linux", "x")).await.unwrap();

        let rust = f.store.range(&partition("rust"), 0, 10).await.unwrap();
        let contents: Vec<_> = rust.iter().map(|m| m.content()).collect();
        assert_eq!(contents, vec!["0", "1", "2"]);
        assert_eq!(f.store.length(&partition("linux")).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn garbage_is_skipped_without_side_effects() {
        let f = fixture().await;

        let outcome = f.archiver.archive("{broken").await.unwrap();

        assert_eq!(outcome, ArchiveOutcome::Skipped);
        assert_eq!(f.store.partition_count().await, 0);
        assert!(f.bus.published().await.is_empty());
    }

    #[tokio::test]
    async fn run_archives_ingress_until_shutdown() {
        let f = fixture().await;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = {
            let archiver = f.archiver.clone();
            tokio::spawn(async move { archiver.run(shutdown_rx).await })
        };
        while f.bus.subscriber_count(&BusChannel::Ingress).await == 0 {
            tokio::task::yield_now().await;
        }

        f.bus
            .publish(&BusChannel::Ingress, &payload("rust", "live"))
            .await
            .unwrap();
        while f.store.length(&partition("rust")).await.unwrap() == 0 {
            tokio::task::yield_now().await;
        }
        shutdown_tx.send(true).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn run_fails_when_bus_disconnects() {
        let f = fixture().await;
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = {
            let archiver = f.archiver.clone();
            tokio::spawn(async move { archiver.run(shutdown_rx).await })
        };
        while f.bus.subscriber_count(&BusChannel::Ingress).await == 0 {
            tokio::task::yield_now().await;
        }

        f.bus.disconnect_all().await;

        let result = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result, Err(ChatError::UpstreamDisconnected));
    }
}
