//! Long-poll query handler.

mod poll_messages;

pub use poll_messages::{PollMessagesHandler, PollMessagesQuery, DEFAULT_POLL_TIMEOUT};
