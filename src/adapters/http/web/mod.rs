//! HTTP adapter for messages posted from the web page.

mod dto;
mod handlers;
mod routes;

pub use dto::{MessageAccepted, PostWebMessageRequest};
pub use handlers::{WebHandlers, UNPARSEABLE_JSON};
pub use routes::web_routes;
