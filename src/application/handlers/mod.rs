//! Application handlers.
//!
//! Command and query handlers that orchestrate domain rules over the ports.

pub mod chatlog;
pub mod ingress;
pub mod poll;

pub use chatlog::{
    ChatLogPolicy, ChatLogView, GetChatLogHandler, GetChatLogQuery, GetLogEntryHandler,
    GetLogEntryQuery, LogEntryView,
};
pub use ingress::{
    PostApiMessageCommand, PostApiMessageHandler, PostWebMessageCommand, PostWebMessageHandler,
};
pub use poll::{PollMessagesHandler, PollMessagesQuery};
