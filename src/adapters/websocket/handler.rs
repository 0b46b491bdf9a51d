//! WebSocket upgrade handler for the live stream.
//!
//! Connection lifecycle:
//! 1. Upgrade to WebSocket
//! 2. Wait for a `{room}` frame and subscribe to that room
//! 3. Push `"OK"`, then every payload published on the room channel
//! 4. Close on client close, malformed frame, failed join or bus loss

use std::fmt::Display;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::get,
    Router,
};
use futures::{Sink, SinkExt, Stream, StreamExt};

use crate::application::LiveSession;
use crate::domain::relay::{RelayOutput, JOIN_ACK};
use crate::ports::MessageBus;

use super::messages::JoinRequest;

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct StreamState {
    bus: Arc<dyn MessageBus>,
}

impl StreamState {
    pub fn new(bus: Arc<dyn MessageBus>) -> Self {
        Self { bus }
    }
}

/// Handle WebSocket upgrade requests for the live stream.
///
/// Route: `GET /stream`
pub async fn stream_handler(ws: WebSocketUpgrade, State(state): State<StreamState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: StreamState) {
    let (sender, receiver) = socket.split();
    relay_connection(LiveSession::new(state.bus), sender, receiver).await;
}

/// Drive one connection until either side goes away.
///
/// Generic over the socket halves so the loop can be exercised without a
/// real upgrade.
pub async fn relay_connection<S, R, E>(mut session: LiveSession, mut sender: S, mut receiver: R)
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
    R: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    let connection_id = session.id();
    tracing::debug!(connection_id = %connection_id, "Live connection opened");

    loop {
        tokio::select! {
            output = session.next_output() => {
                let frame = match output {
                    RelayOutput::Forward(payload) => Message::Text(payload),
                    RelayOutput::Ack => Message::Text(JOIN_ACK.to_string()),
                    RelayOutput::Close => {
                        let _ = sender.send(Message::Close(None)).await;
                        break;
                    }
                };
                if let Err(e) = sender.send(frame).await {
                    tracing::debug!(connection_id = %connection_id, "Send error, closing connection: {}", e);
                    break;
                }
            }
            incoming = receiver.next() => {
                let frame = match incoming {
                    Some(Ok(Message::Text(text))) => text.into_bytes(),
                    Some(Ok(Message::Binary(bytes))) => bytes,
                    Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => continue,
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::debug!(connection_id = %connection_id, "Client closed connection");
                        break;
                    }
                    Some(Err(e)) => {
                        tracing::debug!(connection_id = %connection_id, "Receive error: {}", e);
                        break;
                    }
                };

                let joined = match JoinRequest::parse(&frame) {
                    Ok(req) => session.join(&req.room).await.is_ok(),
                    Err(e) => {
                        tracing::info!(connection_id = %connection_id, error = %e, "Malformed join frame");
                        false
                    }
                };
                if !joined {
                    let _ = sender.send(Message::Close(None)).await;
                    break;
                }
            }
        }
    }

    session.close();
    tracing::debug!(connection_id = %connection_id, "Live connection closed");
}

/// Create the live stream router.
pub fn stream_routes(state: StreamState) -> Router {
    Router::new()
        .route("/stream", get(stream_handler))
        .with_state(state)
}
