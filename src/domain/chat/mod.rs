//! Chat message model, ingress rules and the error taxonomy.

mod errors;
mod ingress;
mod message;

pub use errors::ChatError;
pub use ingress::{validate_content, validate_nickname, CommandClassifier, PrefixCommandClassifier};
pub use message::{ChannelType, Message, MessageType, PublicLogEntry};
