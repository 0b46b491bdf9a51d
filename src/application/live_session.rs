//! LiveSession - One live stream connection's view of the bus.
//!
//! Owns at most one private room subscription and turns its bus events
//! into [`RelayOutput`]s for the transport to act on. The transport stays
//! ignorant of the bus; the session stays ignorant of websockets.

use std::sync::Arc;

use crate::domain::chat::{ChatError, Message};
use crate::domain::foundation::{ConnectionId, StateMachine};
use crate::domain::relay::{BusChannel, BusEvent, ConnectionPhase, RelayOutput};
use crate::ports::{BusSubscription, MessageBus};

pub struct LiveSession {
    id: ConnectionId,
    bus: Arc<dyn MessageBus>,
    phase: ConnectionPhase,
    room: Option<String>,
    subscription: Option<BusSubscription>,
}

impl LiveSession {
    pub fn new(bus: Arc<dyn MessageBus>) -> Self {
        Self {
            id: ConnectionId::new(),
            bus,
            phase: ConnectionPhase::Connecting,
            room: None,
            subscription: None,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn phase(&self) -> ConnectionPhase {
        self.phase
    }

    /// Room currently joined, if any.
    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }

    /// Join `room`, replacing any previous subscription.
    ///
    /// On setup failure the session is closed and the error returned; the
    /// caller is expected to close the client connection.
    pub async fn join(&mut self, room: &str) -> Result<(), ChatError> {
        let next = self.phase.transition_to(ConnectionPhase::Subscribed)?;

        if let Some(mut previous) = self.subscription.take() {
            previous.unsubscribe();
            tracing::debug!(
                connection_id = %self.id,
                room = ?self.room,
                "Released previous room subscription"
            );
        }

        match self.bus.subscribe(&BusChannel::room(room)).await {
            Ok(subscription) => {
                self.subscription = Some(subscription);
                self.room = Some(room.to_string());
                self.phase = next;
                tracing::debug!(connection_id = %self.id, room = %room, "Joined room");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(connection_id = %self.id, room = %room, error = %e, "Join failed");
                self.close();
                Err(e.into())
            }
        }
    }

    /// Wait for the next thing to tell the client.
    ///
    /// Stays pending while no room is joined. Cancel-safe: dropping the
    /// future loses no bus event.
    pub async fn next_output(&mut self) -> RelayOutput {
        loop {
            let event = match self.subscription.as_mut() {
                Some(subscription) => subscription.next_event().await,
                None => return std::future::pending().await,
            };

            match event {
                Some(BusEvent::Message(payload)) => {
                    if self.accepts(&payload) {
                        return RelayOutput::Forward(payload);
                    }
                }
                Some(BusEvent::SubscribedAck) => return RelayOutput::Ack,
                Some(BusEvent::Disconnected) | None => {
                    tracing::info!(
                        connection_id = %self.id,
                        room = ?self.room,
                        "Bus disconnected, closing live connection"
                    );
                    self.close();
                    return RelayOutput::Close;
                }
            }
        }
    }

    /// Release the subscription and mark the session closed. Idempotent.
    pub fn close(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        if let Ok(next) = self.phase.transition_to(ConnectionPhase::Closed) {
            self.phase = next;
        }
    }

    fn accepts(&self, payload: &str) -> bool {
        let message = match Message::from_json(payload) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(connection_id = %self.id, error = %e, "Skipping undecodable bus payload");
                return false;
            }
        };
        if self.room.as_deref() != Some(message.room()) {
            tracing::warn!(
                connection_id = %self.id,
                room = ?self.room,
                message_room = %message.room(),
                "Dropping message routed to the wrong room"
            );
            return false;
        }
        true
    }
}

impl Drop for LiveSession {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::bus::InMemoryMessageBus;
    use crate::domain::chat::{ChannelType, MessageType};
    use std::time::Duration;

    fn payload(room: &str, content: &str) -> String {
        Message::new(
            ChannelType::Web,
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

    fn setup() -> (Arc<InMemoryMessageBus>, LiveSession) {
        let bus = Arc::new(InMemoryMessageBus::new());
        let session = LiveSession::new(bus.clone());
        (bus, session)
    }

    #[tokio::test]
    async fn join_acknowledges_then_forwards_verbatim() {
        let (bus, mut session) = setup();
        session.join("rust").await.unwrap();
        assert_eq!(session.phase(), ConnectionPhase::Subscribed);
        assert_eq!(session.next_output().await, RelayOutput::Ack);

        let sent = payload("rust", "hello");
        bus.publish(&BusChannel::room("rust"), &sent).await.unwrap();

        assert_eq!(session.next_output().await, RelayOutput::Forward(sent));
    }

    #[tokio::test]
    async fn wrong_room_and_garbage_payloads_are_skipped() {
        let (bus, mut session) = setup();
        session.join("rust").await.unwrap();
        session.next_output().await;

        let channel = BusChannel::room("rust");
        bus.publish(&channel, &payload("linux", "elsewhere")).await.unwrap();
        bus.publish(&channel, "not json").await.unwrap();
        let kept = payload("rust", "kept");
        bus.publish(&channel, &kept).await.unwrap();

        assert_eq!(session.next_output().await, RelayOutput::Forward(kept));
    }

    #[tokio::test]
    async fn other_rooms_never_reach_the_session() {
        let (bus, mut session) = setup();
        session.join("rust").await.unwrap();
        session.next_output().await;

        bus.publish(&BusChannel::room("linux"), &payload("linux", "x"))
            .await
            .unwrap();

        let waited = tokio::time::timeout(Duration::from_millis(50), session.next_output()).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn rejoin_replaces_subscription() {
        let (bus, mut session) = setup();
        session.join("rust").await.unwrap();
        session.join("linux").await.unwrap();

        assert_eq!(session.room(), Some("linux"));
        assert_eq!(bus.subscriber_count(&BusChannel::room("rust")).await, 0);
        assert_eq!(bus.subscriber_count(&BusChannel::room("linux")).await, 1);
    }

    #[tokio::test]
    async fn rejoined_session_hears_nothing_from_the_old_room() {
        let (bus, mut session) = setup();
        session.join("rust").await.unwrap();
        session.join("linux").await.unwrap();

        bus.publish(&BusChannel::room("rust"), &payload("rust", "missed"))
            .await
            .unwrap();

        assert_eq!(session.next_output().await, RelayOutput::Ack);
        let waited = tokio::time::timeout(Duration::from_millis(50), session.next_output()).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn closed_session_hears_nothing_afterwards() {
        let (bus, mut session) = setup();
        session.join("rust").await.unwrap();
        assert_eq!(session.next_output().await, RelayOutput::Ack);
        session.close();

        bus.publish(&BusChannel::room("rust"), &payload("rust", "missed"))
            .await
            .unwrap();

        let waited = tokio::time::timeout(Duration::from_millis(50), session.next_output()).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn disconnect_closes_the_session() {
        let (bus, mut session) = setup();
        session.join("rust").await.unwrap();
        session.next_output().await;

        bus.disconnect_all().await;

        assert_eq!(session.next_output().await, RelayOutput::Close);
        assert_eq!(session.phase(), ConnectionPhase::Closed);
    }

    #[tokio::test]
    async fn failed_join_closes_the_session() {
        let (bus, mut session) = setup();
        bus.fail_subscriptions(true);

        assert!(session.join("rust").await.is_err());
        assert_eq!(session.phase(), ConnectionPhase::Closed);
        assert!(session.join("rust").await.is_err());
    }

    #[tokio::test]
    async fn close_is_idempotent_and_releases_subscription() {
        let (bus, mut session) = setup();
        session.join("rust").await.unwrap();

        session.close();
        session.close();

        assert_eq!(session.phase(), ConnectionPhase::Closed);
        assert_eq!(bus.subscriber_count(&BusChannel::room("rust")).await, 0);
    }

    #[tokio::test]
    async fn unjoined_session_stays_pending() {
        let (_bus, mut session) = setup();

        let waited = tokio::time::timeout(Duration::from_millis(20), session.next_output()).await;

        assert!(waited.is_err());
        assert_eq!(session.phase(), ConnectionPhase::Connecting);
    }
}
