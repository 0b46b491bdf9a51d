//! PostWebMessageHandler - Accepts messages typed into the web page.

use std::sync::Arc;

use crate::domain::chat::{
    validate_content, validate_nickname, ChannelType, ChatError, CommandClassifier, Message,
};
use crate::domain::foundation::{Clock, ValidationError};
use crate::ports::MessageBus;

use super::{publish_ingress, EMPTY_MESSAGE, INVALID_NICKNAME, NICKNAME_REQUIRED};

/// Command carrying the decoded web form body.
#[derive(Debug, Clone, Default)]
pub struct PostWebMessageCommand {
    pub room: String,
    pub nickname: Option<String>,
    pub content: Option<String>,
}

/// Handler for web form posts.
pub struct PostWebMessageHandler {
    bus: Arc<dyn MessageBus>,
    clock: Arc<dyn Clock>,
    classifier: Arc<dyn CommandClassifier>,
}

impl PostWebMessageHandler {
    pub fn new(
        bus: Arc<dyn MessageBus>,
        clock: Arc<dyn Clock>,
        classifier: Arc<dyn CommandClassifier>,
    ) -> Self {
        Self {
            bus,
            clock,
            classifier,
        }
    }

    pub async fn handle(&self, cmd: PostWebMessageCommand) -> Result<Message, ChatError> {
        let content = validate_content(cmd.content.as_deref())
            .map_err(|_| ChatError::bad_request(EMPTY_MESSAGE))?;

        let sender = validate_nickname(cmd.nickname.as_deref()).map_err(|e| match e {
            ValidationError::EmptyField { .. } => ChatError::bad_request(NICKNAME_REQUIRED),
            _ => ChatError::bad_request(INVALID_NICKNAME),
        })?;

        let (date, time) = self.clock.stamp();
        let message = Message::new(
            ChannelType::Web,
            sender,
            cmd.room,
            content,
            self.classifier.classify(content),
            date,
            time,
        );

        publish_ingress(self.bus.as_ref(), &message).await?;
        tracing::debug!(room = %message.room(), sender = %message.sender(), "Accepted web message");
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::bus::InMemoryMessageBus;
    use crate::domain::chat::{MessageType, PrefixCommandClassifier};
    use crate::domain::foundation::FixedClock;
    use crate::domain::relay::BusChannel;

    fn setup() -> (PostWebMessageHandler, Arc<InMemoryMessageBus>) {
        let bus = Arc::new(InMemoryMessageBus::new());
        let handler = PostWebMessageHandler::new(
            bus.clone(),
            Arc::new(FixedClock::parse("2024-03-10T23:59:58+08:00").unwrap()),
            Arc::new(PrefixCommandClassifier),
        );
        (handler, bus)
    }

    fn cmd(nickname: Option<&str>, content: Option<&str>) -> PostWebMessageCommand {
        PostWebMessageCommand {
            room: "rust".into(),
            nickname: nickname.map(String::from),
            content: content.map(String::from),
        }
    }

    #[tokio::test]
    async fn publishes_stamped_message_to_ingress() {
        let (handler, bus) = setup();

        let message = handler
            .handle(cmd(Some("  alice "), Some("hello")))
            .await
            .unwrap();

        assert_eq!(message.sender(), "alice");
        assert_eq!(message.channel_type(), ChannelType::Web);
        assert_eq!(message.message_type(), MessageType::Text);
        assert_eq!(message.date(), "2024-03-10");
        assert_eq!(message.time(), "23:59:58");

        let published = bus.published_on(&BusChannel::Ingress).await;
        assert_eq!(published.len(), 1);
        assert_eq!(Message::from_json(&published[0]).unwrap(), message);
    }

    #[tokio::test]
    async fn slash_prefixed_content_is_a_command() {
        let (handler, _) = setup();

        let message = handler.handle(cmd(Some("alice"), Some("/help"))).await.unwrap();

        assert_eq!(message.message_type(), MessageType::Command);
    }

    #[tokio::test]
    async fn rejects_empty_content() {
        let (handler, bus) = setup();

        for content in [None, Some("")] {
            let err = handler.handle(cmd(Some("alice"), content)).await.unwrap_err();
            assert_eq!(err, ChatError::bad_request(EMPTY_MESSAGE));
        }
        assert!(bus.published().await.is_empty());
    }

    #[tokio::test]
    async fn rejects_missing_nickname() {
        let (handler, _) = setup();

        for nickname in [None, Some(""), Some("   ")] {
            let err = handler.handle(cmd(nickname, Some("hi"))).await.unwrap_err();
            assert_eq!(err, ChatError::bad_request(NICKNAME_REQUIRED));
        }
    }

    #[tokio::test]
    async fn rejects_nickname_starting_with_symbol() {
        let (handler, _) = setup();

        let err = handler.handle(cmd(Some("@bot"), Some("hi"))).await.unwrap_err();

        assert_eq!(err, ChatError::bad_request(INVALID_NICKNAME));
    }
}
