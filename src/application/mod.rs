//! Application layer - Commands, Queries, Handlers and background services.
//!
//! This layer orchestrates domain rules and coordinates between ports.
//! Request/response work lives in `handlers`; long-lived work (the archiver
//! and per-connection live sessions) sits beside it.

pub mod archiver;
pub mod handlers;
pub mod live_session;

pub use archiver::{ArchiveOutcome, ChatArchiver};
pub use handlers::{
    // Chat log queries
    ChatLogPolicy, ChatLogView, GetChatLogHandler, GetChatLogQuery, GetLogEntryHandler,
    GetLogEntryQuery, LogEntryView,
    // Ingress commands
    PostApiMessageCommand, PostApiMessageHandler, PostWebMessageCommand, PostWebMessageHandler,
    // Long-poll
    PollMessagesHandler, PollMessagesQuery,
};
pub use live_session::LiveSession;
