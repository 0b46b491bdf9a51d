//! Chat log query handlers.

mod get_chat_log;
mod get_log_entry;

pub use get_chat_log::{
    ChatLogPolicy, ChatLogView, GetChatLogHandler, GetChatLogQuery, RETENTION_REFUSAL,
};
pub use get_log_entry::{GetLogEntryHandler, GetLogEntryQuery, LogEntryView};
