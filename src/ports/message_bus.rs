//! MessageBus port - Interface for the room-keyed pub/sub channel.
//!
//! Producers publish serialized messages without knowing the transport
//! (Redis pub/sub in production, in-process channels in tests).

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::domain::chat::ChatError;
use crate::domain::relay::{BusChannel, BusEvent};

/// Errors raised by bus adapters.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    /// Could not reach the bus.
    #[error("Bus connection error: {0}")]
    Connection(String),

    /// Publish was rejected or failed in transit.
    #[error("Bus publish failed: {0}")]
    Publish(String),

    /// Subscription setup failed.
    #[error("Bus subscribe failed: {0}")]
    Subscribe(String),
}

impl From<BusError> for ChatError {
    fn from(err: BusError) -> Self {
        ChatError::infrastructure(err.to_string())
    }
}

/// Port for the message bus.
///
/// Implementations must ensure:
/// - `publish` reaches every subscriber that exists at publish time, at
///   least once, in publish order per channel
/// - subscribers joining later see nothing published before they joined
/// - each `subscribe` call yields a private handle; dropping or
///   unsubscribing one never affects another
/// - publishing is safe from many tasks at once without extra locking
#[async_trait]
pub trait MessageBus: Send + Sync {
    /// Fire-and-forget publish of a serialized message.
    async fn publish(&self, channel: &BusChannel, payload: &str) -> Result<(), BusError>;

    /// Open a new subscription. The first event is normally `SubscribedAck`.
    async fn subscribe(&self, channel: &BusChannel) -> Result<BusSubscription, BusError>;
}

/// A private handle on one bus subscription.
///
/// Yields [`BusEvent`]s lazily. If the adapter's event source goes away,
/// the handle reports a single `Disconnected` and then ends. Unsubscribing
/// is idempotent and also happens on drop.
#[derive(Debug)]
pub struct BusSubscription {
    channel: BusChannel,
    events: mpsc::UnboundedReceiver<BusEvent>,
    cancel: Option<oneshot::Sender<()>>,
    finished: bool,
}

impl BusSubscription {
    /// Wrap an adapter's event channel.
    ///
    /// `cancel` is fired on unsubscribe so the adapter can release its
    /// upstream resources; adapters that clean up lazily may pass `None`.
    pub fn new(
        channel: BusChannel,
        events: mpsc::UnboundedReceiver<BusEvent>,
        cancel: Option<oneshot::Sender<()>>,
    ) -> Self {
        Self {
            channel,
            events,
            cancel,
            finished: false,
        }
    }

    pub fn channel(&self) -> &BusChannel {
        &self.channel
    }

    pub fn is_active(&self) -> bool {
        !self.finished
    }

    /// Wait for the next event. Returns `None` once the subscription has
    /// ended (disconnected or unsubscribed).
    pub async fn next_event(&mut self) -> Option<BusEvent> {
        if self.finished {
            return None;
        }
        match self.events.recv().await {
            Some(BusEvent::Disconnected) | None => {
                self.finished = true;
                Some(BusEvent::Disconnected)
            }
            Some(event) => Some(event),
        }
    }

    /// Release the subscription. Safe to call any number of times.
    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
        self.events.close();
        self.finished = true;
    }
}

impl Drop for BusSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
