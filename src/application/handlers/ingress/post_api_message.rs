//! PostApiMessageHandler - Accepts messages from credentialed API clients.

use std::sync::Arc;

use crate::domain::chat::{validate_content, ChannelType, ChatError, CommandClassifier, Message};
use crate::domain::foundation::Clock;
use crate::ports::{ApiClientDirectory, ApiCredentials, MessageBus};

use super::{publish_ingress, EMPTY_MESSAGE, INVALID_TOKENS};

#[derive(Debug, Clone)]
pub struct PostApiMessageCommand {
    pub room: String,
    pub credentials: ApiCredentials,
    pub content: Option<String>,
}

/// Handler for API client posts. The sender is the client's registered
/// display name, falling back to its token id.
pub struct PostApiMessageHandler {
    bus: Arc<dyn MessageBus>,
    directory: Arc<dyn ApiClientDirectory>,
    clock: Arc<dyn Clock>,
    classifier: Arc<dyn CommandClassifier>,
}

impl PostApiMessageHandler {
    pub fn new(
        bus: Arc<dyn MessageBus>,
        directory: Arc<dyn ApiClientDirectory>,
        clock: Arc<dyn Clock>,
        classifier: Arc<dyn CommandClassifier>,
    ) -> Self {
        Self {
            bus,
            directory,
            clock,
            classifier,
        }
    }

    pub async fn handle(&self, cmd: PostApiMessageCommand) -> Result<Message, ChatError> {
        if !self.directory.authenticate(&cmd.credentials).await? {
            tracing::info!(token_id = %cmd.credentials.token_id, "Rejected API credentials");
            return Err(ChatError::forbidden(INVALID_TOKENS));
        }

        let content = validate_content(cmd.content.as_deref())
            .map_err(|_| ChatError::bad_request(EMPTY_MESSAGE))?;

        let sender = self
            .directory
            .display_name(&cmd.credentials.token_id)
            .await?
            .unwrap_or_else(|| cmd.credentials.token_id.to_string());

        let (date, time) = self.clock.stamp();
        let message = Message::new(
            ChannelType::Api,
            sender,
            cmd.room,
            content,
            self.classifier.classify(content),
            date,
            time,
        );

        publish_ingress(self.bus.as_ref(), &message).await?;
        tracing::debug!(
            room = %message.room(),
            token_id = %cmd.credentials.token_id,
            "Accepted API message"
        );
        Ok(message)
    }
}
