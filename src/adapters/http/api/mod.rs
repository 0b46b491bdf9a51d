//! HTTP adapter for credentialed API clients: posting and long-poll.

mod dto;
mod handlers;
mod routes;

pub use dto::{PollParams, PollResponse, PostApiMessageRequest};
pub use handlers::{ApiHandlers, EMPTY_BODY, MISSING_CREDENTIALS};
pub use routes::api_routes;
