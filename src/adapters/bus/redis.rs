//! Redis pub/sub message bus for production deployments.
//!
//! Publishing goes through one shared multiplexed connection, cloned per
//! call. Every subscription opens its own pub/sub connection, driven by a
//! background task that forwards messages into the subscription handle
//! until the handle is released or Redis goes away.

use async_trait::async_trait;
use futures::StreamExt;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tokio::sync::{mpsc, oneshot};

use crate::domain::relay::{BusChannel, BusEvent};
use crate::ports::{BusError, BusSubscription, MessageBus};

/// Redis-backed message bus.
#[derive(Clone)]
pub struct RedisMessageBus {
    client: redis::Client,
    publisher: MultiplexedConnection,
}

impl RedisMessageBus {
    /// Create a bus from an existing client and publish connection.
    pub fn new(client: redis::Client, publisher: MultiplexedConnection) -> Self {
        Self { client, publisher }
    }

    /// Open the client and the shared publish connection.
    pub async fn connect(url: &str) -> Result<Self, BusError> {
        let client =
            redis::Client::open(url).map_err(|e| BusError::Connection(e.to_string()))?;
        let publisher = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(|e| BusError::Connection(e.to_string()))?;
        Ok(Self::new(client, publisher))
    }
}

#[async_trait]
impl MessageBus for RedisMessageBus {
    async fn publish(&self, channel: &BusChannel, payload: &str) -> Result<(), BusError> {
        let mut conn = self.publisher.clone();
        let receivers: i64 = conn
            .publish(channel.key(), payload)
            .await
            .map_err(|e: redis::RedisError| BusError::Publish(e.to_string()))?;

        tracing::trace!(channel = %channel, receivers, "Published to bus");
        Ok(())
    }

    async fn subscribe(&self, channel: &BusChannel) -> Result<BusSubscription, BusError> {
        let key = channel.key();
        let mut pubsub = self
            .client
            .get_async_connection()
            .await
            .map_err(|e| BusError::Connection(e.to_string()))?
            .into_pubsub();
        pubsub
            .subscribe(&key)
            .await
            .map_err(|e| BusError::Subscribe(e.to_string()))?;

        let (tx, rx) = mpsc::unbounded_channel();
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = tx.send(BusEvent::SubscribedAck);

            let released = {
                let mut messages = pubsub.on_message();
                loop {
                    tokio::select! {
                        _ = &mut cancel_rx => break true,
                        msg = messages.next() => match msg {
                            Some(msg) => match msg.get_payload::<String>() {
                                Ok(payload) => {
                                    if tx.send(BusEvent::Message(payload)).is_err() {
                                        break true;
                                    }
                                }
                                Err(e) => {
                                    tracing::warn!(
                                        channel = %key,
                                        error = %e,
                                        "Skipping non-text bus payload"
                                    );
                                }
                            },
                            None => {
                                tracing::warn!(channel = %key, "Bus connection lost");
                                let _ = tx.send(BusEvent::Disconnected);
                                break false;
                            }
                        }
                    }
                }
            };

            if released {
                if let Err(e) = pubsub.unsubscribe(&key).await {
                    tracing::debug!(channel = %key, error = %e, "Unsubscribe failed");
                }
            }
            tracing::debug!(channel = %key, "Bus subscription closed");
        });

        Ok(BusSubscription::new(channel.clone(), rx, Some(cancel_tx)))
    }
}

impl std::fmt::Debug for RedisMessageBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisMessageBus").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Requires a running Redis instance: cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn publish_reaches_subscriber() {
        let bus = RedisMessageBus::connect("redis://127.0.0.1/").await.unwrap();
        let channel = BusChannel::room("redis-bus-test");
        let mut sub = bus.subscribe(&channel).await.unwrap();
        assert_eq!(sub.next_event().await, Some(BusEvent::SubscribedAck));

        bus.publish(&channel, "hello").await.unwrap();

        assert_eq!(sub.next_event().await, Some(BusEvent::Message("hello".into())));
        sub.unsubscribe();
    }
}
