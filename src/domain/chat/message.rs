//! The chat message record shared by every relay path.
//!
//! A [`Message`] is stamped once at ingress and never mutated. It travels as
//! JSON over the bus, sits as JSON in the log store and long-poll queues, and
//! decodes back to an identical value on every consumer path.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::{ValidationError, DATE_FORMAT};

/// Front-end a message originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    Irc,
    Xmpp,
    Telegram,
    Gitter,
    Matrix,
    Wechat,
    Web,
    Api,
}

/// Kind of payload carried in `content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Text,
    Photo,
    Sticker,
    Location,
    Audio,
    Command,
    Event,
}

/// Immutable chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "channel")]
    channel_type: ChannelType,
    sender: String,
    #[serde(default)]
    receiver: String,
    room: String,
    content: String,
    #[serde(rename = "mtype", default)]
    message_type: MessageType,
    date: String,
    time: String,
    #[serde(default)]
    media: Option<String>,
    #[serde(default)]
    botid: Option<String>,
    #[serde(default)]
    opt: Map<String, Value>,
}

impl Message {
    /// Creates a public message with no receiver, media or metadata.
    pub fn new(
        channel_type: ChannelType,
        sender: impl Into<String>,
        room: impl Into<String>,
        content: impl Into<String>,
        message_type: MessageType,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            channel_type,
            sender: sender.into(),
            receiver: String::new(),
            room: room.into(),
            content: content.into(),
            message_type,
            date: date.into(),
            time: time.into(),
            media: None,
            botid: None,
            opt: Map::new(),
        }
    }

    /// Sets the private-routing receiver.
    pub fn with_receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = receiver.into();
        self
    }

    pub fn with_media(mut self, media: impl Into<String>) -> Self {
        self.media = Some(media.into());
        self
    }

    pub fn with_botid(mut self, botid: impl Into<String>) -> Self {
        self.botid = Some(botid.into());
        self
    }

    /// Adds one metadata entry to `opt`.
    pub fn with_opt(mut self, key: impl Into<String>, value: Value) -> Self {
        self.opt.insert(key.into(), value);
        self
    }

    pub fn channel_type(&self) -> ChannelType {
        self.channel_type
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn media(&self) -> Option<&str> {
        self.media.as_deref()
    }

    pub fn botid(&self) -> Option<&str> {
        self.botid.as_deref()
    }

    pub fn opt(&self) -> &Map<String, Value> {
        &self.opt
    }

    /// Serializes to the wire/storage representation.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decodes the wire/storage representation.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Calendar day of the log partition this message belongs to.
    pub fn partition_date(&self) -> Result<NaiveDate, ValidationError> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT)
            .map_err(|_| ValidationError::invalid_format("date", "expected YYYY-MM-DD"))
    }

    /// Projects the message for bulk public feeds, dropping `opt` and
    /// `receiver` and attaching its log index.
    pub fn into_public(self, id: u64) -> PublicLogEntry {
        PublicLogEntry {
            channel_type: self.channel_type,
            sender: self.sender,
            room: self.room,
            content: self.content,
            message_type: self.message_type,
            date: self.date,
            time: self.time,
            media: self.media,
            botid: self.botid,
            id,
        }
    }
}

/// Message as exposed by the JSON history feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicLogEntry {
    #[serde(rename = "channel")]
    pub channel_type: ChannelType,
    pub sender: String,
    pub room: String,
    pub content: String,
    #[serde(rename = "mtype")]
    pub message_type: MessageType,
    pub date: String,
    pub time: String,
    pub media: Option<String>,
    pub botid: Option<String>,
    pub id: u64,
}
