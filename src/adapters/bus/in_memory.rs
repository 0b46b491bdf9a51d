//! In-memory message bus for tests and single-process development.
//!
//! Each subscription gets its own unbounded channel, so delivery per channel
//! follows publish order and nothing is dropped for slow readers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

use crate::domain::relay::{BusChannel, BusEvent};
use crate::ports::{BusError, BusSubscription, MessageBus};

/// In-process bus.
///
/// Features:
/// - Per-subscriber channels (no shared handles)
/// - Publish capture for assertions
/// - Simulated upstream loss via [`disconnect_all`](Self::disconnect_all)
/// - Simulated subscribe failures via [`fail_subscriptions`](Self::fail_subscriptions)
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryMessageBus::new());
/// let mut sub = bus.subscribe(&BusChannel::room("rust")).await?;
/// bus.publish(&BusChannel::room("rust"), payload).await?;
/// ```
#[derive(Default)]
pub struct InMemoryMessageBus {
    subscribers: Mutex<HashMap<BusChannel, Vec<mpsc::UnboundedSender<BusEvent>>>>,
    published: Mutex<Vec<(BusChannel, String)>>,
    refuse_subscribe: AtomicBool,
}

impl InMemoryMessageBus {
    /// Creates a new empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// Every publication so far, in order.
    pub async fn published(&self) -> Vec<(BusChannel, String)> {
        self.published.lock().await.clone()
    }

    /// Payloads published on one channel, in order.
    pub async fn published_on(&self, channel: &BusChannel) -> Vec<String> {
        self.published
            .lock()
            .await
            .iter()
            .filter(|(c, _)| c == channel)
            .map(|(_, payload)| payload.clone())
            .collect()
    }

    /// Live subscriptions on a channel. Released handles are not counted.
    pub async fn subscriber_count(&self, channel: &BusChannel) -> usize {
        let mut subscribers = self.subscribers.lock().await;
        match subscribers.get_mut(channel) {
            Some(senders) => {
                senders.retain(|tx| !tx.is_closed());
                senders.len()
            }
            None => 0,
        }
    }

    /// Simulate losing the bus: every subscriber sees `Disconnected`.
    pub async fn disconnect_all(&self) {
        let drained: Vec<_> = self.subscribers.lock().await.drain().collect();
        for (_, senders) in drained {
            for tx in senders {
                let _ = tx.send(BusEvent::Disconnected);
            }
        }
    }

    /// Make subsequent `subscribe` calls fail (or succeed again).
    pub fn fail_subscriptions(&self, fail: bool) {
        self.refuse_subscribe.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl MessageBus for InMemoryMessageBus {
    async fn publish(&self, channel: &BusChannel, payload: &str) -> Result<(), BusError> {
        self.published
            .lock()
            .await
            .push((channel.clone(), payload.to_string()));

        let mut subscribers = self.subscribers.lock().await;
        if let Some(senders) = subscribers.get_mut(channel) {
            senders.retain(|tx| tx.send(BusEvent::Message(payload.to_string())).is_ok());
        }
        Ok(())
    }

    async fn subscribe(&self, channel: &BusChannel) -> Result<BusSubscription, BusError> {
        if self.refuse_subscribe.load(Ordering::SeqCst) {
            return Err(BusError::Subscribe(format!(
                "subscriptions refused for {}",
                channel
            )));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let _ = tx.send(BusEvent::SubscribedAck);
        self.subscribers
            .lock()
            .await
            .entry(channel.clone())
            .or_default()
            .push(tx);

        Ok(BusSubscription::new(channel.clone(), rx, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribe_acknowledges_first() {
        let bus = InMemoryMessageBus::new();
        let mut sub = bus.subscribe(&BusChannel::room("rust")).await.unwrap();

        assert_eq!(sub.next_event().await, Some(BusEvent::SubscribedAck));
    }

    #[tokio::test]
    async fn publish_reaches_every_subscriber_in_order() {
        let bus = InMemoryMessageBus::new();
        let channel = BusChannel::room("rust");
        let mut a = bus.subscribe(&channel).await.unwrap();
        let mut b = bus.subscribe(&channel).await.unwrap();

        bus.publish(&channel, "one").await.unwrap();
        bus.publish(&channel, "two").await.unwrap();

        for sub in [&mut a, &mut b] {
            assert_eq!(sub.next_event().await, Some(BusEvent::SubscribedAck));
            assert_eq!(sub.next_event().await, Some(BusEvent::Message("one".into())));
            assert_eq!(sub.next_event().await, Some(BusEvent::Message("two".into())));
        }
    }

    #[tokio::test]
    async fn late_subscriber_sees_no_backlog() {
        let bus = InMemoryMessageBus::new();
        let channel = BusChannel::room("rust");
        bus.publish(&channel, "early").await.unwrap();

        let mut sub = bus.subscribe(&channel).await.unwrap();
        bus.publish(&channel, "late").await.unwrap();

        assert_eq!(sub.next_event().await, Some(BusEvent::SubscribedAck));
        assert_eq!(sub.next_event().await, Some(BusEvent::Message("late".into())));
    }

    #[tokio::test]
    async fn channels_are_isolated() {
        let bus = InMemoryMessageBus::new();
        let mut other = bus.subscribe(&BusChannel::room("linux")).await.unwrap();

        bus.publish(&BusChannel::room("rust"), "m").await.unwrap();
        bus.disconnect_all().await;

        assert_eq!(other.next_event().await, Some(BusEvent::SubscribedAck));
        assert_eq!(other.next_event().await, Some(BusEvent::Disconnected));
    }

    #[tokio::test]
    async fn released_handles_are_pruned() {
        let bus = InMemoryMessageBus::new();
        let channel = BusChannel::room("rust");
        let mut sub = bus.subscribe(&channel).await.unwrap();
        let _keep = bus.subscribe(&channel).await.unwrap();
        assert_eq!(bus.subscriber_count(&channel).await, 2);

        sub.unsubscribe();

        assert_eq!(bus.subscriber_count(&channel).await, 1);
    }

    #[tokio::test]
    async fn refused_subscription_is_an_error() {
        let bus = InMemoryMessageBus::new();
        bus.fail_subscriptions(true);

        assert!(bus.subscribe(&BusChannel::Ingress).await.is_err());
    }

    #[tokio::test]
    async fn publish_is_recorded() {
        let bus = InMemoryMessageBus::new();
        bus.publish(&BusChannel::Ingress, "a").await.unwrap();
        bus.publish(&BusChannel::room("r"), "b").await.unwrap();

        assert_eq!(bus.published().await.len(), 2);
        assert_eq!(bus.published_on(&BusChannel::Ingress).await, vec!["a"]);
    }
}
