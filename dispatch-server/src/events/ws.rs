//! WebSocket endpoint for the dispatch event feed
//!
//! Each connection gets its own broadcast receiver; events are serialized
//! to JSON text frames. Incoming frames are ignored except close.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tokio::sync::broadcast::error::RecvError;

use crate::core::ServerState;

/// GET /api/events — upgrade to the event feed
pub async fn events_handler(
    ws: WebSocketUpgrade,
    State(state): State<ServerState>,
) -> Response {
    let broadcaster = state.broadcaster().clone();
    ws.on_upgrade(move |socket| forward_events(socket, broadcaster))
}

async fn forward_events(mut socket: WebSocket, broadcaster: crate::events::EventBroadcaster) {
    let mut rx = broadcaster.subscribe();
    tracing::debug!("event feed client connected");

    loop {
        tokio::select! {
            event = rx.recv() => {
                match event {
                    Ok(event) => {
                        let text = match serde_json::to_string(&event) {
                            Ok(text) => text,
                            Err(e) => {
                                tracing::error!("failed to serialize dispatch event: {e}");
                                continue;
                            }
                        };
                        if socket.send(Message::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "event feed client lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {} // ignore pings and stray frames
                    Some(Err(_)) => break,
                }
            }
        }
    }

    tracing::debug!("event feed client disconnected");
}
