//! HTTP adapter for the history view and permalinks.

mod dto;
mod handlers;
mod html;
mod routes;

pub use dto::{ChatLogPageConfig, ChatLogParams, LogEntryPage};
pub use handlers::ChatLogHandlers;
pub use html::escape_html;
pub use routes::chatlog_routes;
