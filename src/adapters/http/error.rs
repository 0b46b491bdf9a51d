//! Error body and the single `ChatError` to HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::chat::ChatError;
use crate::domain::foundation::ErrorCode;

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::BadRequest.to_string(),
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Forbidden.to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::NotFound.to_string(),
            message: message.into(),
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::UpstreamDisconnected.to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InternalError.to_string(),
            message: message.into(),
        }
    }
}

/// Malformed body shorthand shared by the ingress endpoints.
pub fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(message)),
    )
        .into_response()
}

/// Map a relay outcome to its response.
pub fn handle_chat_error(error: ChatError) -> Response {
    match error {
        ChatError::BadRequest(msg) => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(msg))).into_response()
        }
        ChatError::Forbidden(msg) => {
            (StatusCode::FORBIDDEN, Json(ErrorResponse::forbidden(msg))).into_response()
        }
        ChatError::NotFound(msg) => {
            (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found(msg))).into_response()
        }
        ChatError::UpstreamDisconnected => {
            tracing::warn!("Request failed: upstream bus disconnected");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::bad_gateway("Upstream bus disconnected")),
            )
                .into_response()
        }
        ChatError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "Infrastructure error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("An internal error occurred")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_response_serializes_code_and_message() {
        let value = serde_json::to_value(ErrorResponse::not_found("Room not found")).unwrap();
        assert_eq!(value, json!({"code": "NOT_FOUND", "message": "Room not found"}));
    }

    #[test]
    fn chat_errors_map_to_status_codes() {
        assert_eq!(
            handle_chat_error(ChatError::bad_request("x")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            handle_chat_error(ChatError::forbidden("x")).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            handle_chat_error(ChatError::not_found("x")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            handle_chat_error(ChatError::UpstreamDisconnected).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            handle_chat_error(ChatError::infrastructure("corrupt")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
