//! HTTP routes for history endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_chat_log, get_log_entry, redirect_to_default, ChatLogHandlers};

/// Creates the history router.
pub fn chatlog_routes(handlers: ChatLogHandlers) -> Router {
    Router::new()
        .route("/", get(redirect_to_default))
        .route("/log/:room/:date", get(get_chat_log))
        .route("/log/:room/:date/:id", get(get_log_entry))
        .with_state(handlers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use chrono::NaiveDate;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::adapters::log_store::InMemoryLogStore;
    use crate::application::handlers::chatlog::{
        ChatLogPolicy, GetChatLogHandler, GetLogEntryHandler,
    };
    use crate::domain::chat::{ChannelType, Message, MessageType};
    use crate::domain::chatlog::{LogPartition, RetentionPolicy, RoomAccess};
    use crate::domain::foundation::FixedClock;
    use crate::ports::LogStore;

    async fn app() -> Router {
        let store = InMemoryLogStore::new();
        let partition = LogPartition::new("rust", NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        for i in 0..20 {
            let message = Message::new(
                ChannelType::Irc,
                "alice",
                "rust",
                format!("message {}", i),
                MessageType::Text,
                "2024-03-10",
                "10:00:00",
            )
            .with_receiver("bob");
            store.append(&partition, &message).await.unwrap();
        }

        let store = Arc::new(store);
        let clock = Arc::new(FixedClock::parse("2024-03-10T12:00:00+08:00").unwrap());
        let access = RoomAccess::new(
            ["rust", "linux", "secret"].map(String::from),
            ["secret"].map(String::from),
        );
        let policy = ChatLogPolicy::new(access.clone(), RetentionPolicy::new(7), 15);

        chatlog_routes(ChatLogHandlers::new(
            Arc::new(GetChatLogHandler::new(store.clone(), clock.clone(), policy)),
            Arc::new(GetLogEntryHandler::new(store, clock, access)),
            "rust",
            "",
        ))
    }

    async fn get(uri: &str) -> axum::response::Response {
        app()
            .await
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn json_feed_returns_projected_window() {
        let response = get("/log/rust/today?json=1&limit=5").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0]["id"], 15);
        assert_eq!(entries[4]["content"], "message 19");
        assert!(entries[0].get("opt").is_none());
        assert!(entries[0].get("receiver").is_none());
    }

    #[tokio::test]
    async fn html_is_the_default() {
        let response = get("/log/rust/2024-03-10").await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn private_room_is_not_found() {
        let response = get("/log/secret/today?json=1").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn expired_date_is_forbidden() {
        let response = get("/log/rust/2024-03-01?json=1").await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = json_body(response).await;
        assert_eq!(body["code"], "FORBIDDEN");
        assert_eq!(body["message"], "Dark History Covered");
    }

    #[tokio::test]
    async fn bad_numeric_argument_is_bad_request() {
        let response = get("/log/rust/today?json=1&last=abc").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn permalink_serves_stored_message() {
        let response = get("/log/rust/2024-03-10/3").await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Text from alice"));
        assert!(html.contains("message 3"));
    }

    #[tokio::test]
    async fn permalink_past_the_end_is_not_found() {
        let response = get("/log/rust/2024-03-10/99").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn root_redirects_to_default_room() {
        let response = get("/").await;
        assert!(response.status().is_redirection());
        assert_eq!(response.headers()[header::LOCATION], "/log/rust/today");
    }
}
