//! HTTP adapters - the relay's web surface.
//!
//! Each surface has its own adapter (dto, handlers, routes). [`app_router`]
//! merges them with the live stream and wraps the result in the shared
//! layers: request ids, tracing, CORS and a request timeout.

pub mod api;
pub mod chatlog;
pub mod error;
pub mod middleware;
pub mod web;

use std::sync::Arc;

use axum::Router;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::adapters::websocket::{stream_routes, StreamState};
use crate::application::handlers::chatlog::{ChatLogPolicy, GetChatLogHandler, GetLogEntryHandler};
use crate::application::handlers::ingress::{PostApiMessageHandler, PostWebMessageHandler};
use crate::application::handlers::poll::PollMessagesHandler;
use crate::config::{ChatlogConfig, ConfigValidationError, PollConfig, ServerConfig};
use crate::domain::chat::{CommandClassifier, PrefixCommandClassifier};
use crate::domain::foundation::Clock;
use crate::ports::{ApiClientDirectory, LogStore, MessageBus, PollQueue};

pub use api::{api_routes, ApiHandlers};
pub use chatlog::{chatlog_routes, ChatLogHandlers};
pub use error::{handle_chat_error, ErrorResponse};
pub use web::{web_routes, WebHandlers};

/// Handler state for every surface.
#[derive(Clone)]
pub struct RelayRoutes {
    pub chatlog: ChatLogHandlers,
    pub web: WebHandlers,
    pub api: ApiHandlers,
    pub stream: StreamState,
}

/// Port implementations shared by every handler.
#[derive(Clone)]
pub struct RelayPorts {
    pub bus: Arc<dyn MessageBus>,
    pub store: Arc<dyn LogStore>,
    pub queue: Arc<dyn PollQueue>,
    pub directory: Arc<dyn ApiClientDirectory>,
    pub clock: Arc<dyn Clock>,
}

impl RelayRoutes {
    /// Wire every handler over `ports` with the configured history rules.
    pub fn wire(
        ports: &RelayPorts,
        chatlog: &ChatlogConfig,
        poll: &PollConfig,
    ) -> Result<Self, ConfigValidationError> {
        let default_room = chatlog
            .default_room()
            .ok_or(ConfigValidationError::MissingRequired("CHATLOG__BINDINGS"))?;
        let classifier: Arc<dyn CommandClassifier> = Arc::new(PrefixCommandClassifier);
        let policy = ChatLogPolicy::new(
            chatlog.room_access(),
            chatlog.retention(),
            chatlog.embedded_limit,
        );

        let chatlog_handlers = ChatLogHandlers::new(
            Arc::new(GetChatLogHandler::new(
                ports.store.clone(),
                ports.clock.clone(),
                policy,
            )),
            Arc::new(GetLogEntryHandler::new(
                ports.store.clone(),
                ports.clock.clone(),
                chatlog.room_access(),
            )),
            default_room,
            chatlog.base_path(),
        );

        let web = WebHandlers::new(Arc::new(PostWebMessageHandler::new(
            ports.bus.clone(),
            ports.clock.clone(),
            classifier.clone(),
        )));

        let api = ApiHandlers::new(
            Arc::new(PostApiMessageHandler::new(
                ports.bus.clone(),
                ports.directory.clone(),
                ports.clock.clone(),
                classifier,
            )),
            Arc::new(
                PollMessagesHandler::new(ports.directory.clone(), ports.queue.clone())
                    .with_timeout(poll.timeout()),
            ),
        );

        Ok(Self {
            chatlog: chatlog_handlers,
            web,
            api,
            stream: StreamState::new(ports.bus.clone()),
        })
    }
}

/// Build the complete application router.
pub fn app_router(routes: RelayRoutes, server: &ServerConfig) -> Router {
    let request_id = middleware::request_id_header();

    Router::new()
        .merge(chatlog_routes(routes.chatlog))
        .merge(web_routes(routes.web))
        .merge(api_routes(routes.api))
        .merge(stream_routes(routes.stream))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(middleware::cors_layer(&server.cors_origins_list()))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}
