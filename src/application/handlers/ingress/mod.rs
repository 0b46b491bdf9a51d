//! Ingress command handlers.
//!
//! Both paths validate, stamp and publish to the ingress channel. Neither
//! writes the log; the archiver does.

mod post_api_message;
mod post_web_message;

pub use post_api_message::{PostApiMessageCommand, PostApiMessageHandler};
pub use post_web_message::{PostWebMessageCommand, PostWebMessageHandler};

use crate::domain::chat::{ChatError, Message};
use crate::domain::relay::BusChannel;
use crate::ports::MessageBus;

pub const EMPTY_MESSAGE: &str = "Cannot send empty message";
pub const NICKNAME_REQUIRED: &str = "Nickname must be set";
pub const INVALID_NICKNAME: &str = "Invalid char found, use a human's nickname instead!";
pub const INVALID_TOKENS: &str = "Invalid tokens";

async fn publish_ingress(bus: &dyn MessageBus, message: &Message) -> Result<(), ChatError> {
    let payload = message
        .to_json()
        .map_err(|e| ChatError::infrastructure(e.to_string()))?;
    bus.publish(&BusChannel::Ingress, &payload).await?;
    Ok(())
}
