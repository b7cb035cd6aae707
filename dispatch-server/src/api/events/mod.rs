//! Event Feed Route
//!
//! WebSocket upgrade endpoint; forwarding logic lives in
//! [`crate::events::ws`].

use axum::{Router, routing::get};

use crate::core::ServerState;
use crate::events::ws::events_handler;

/// Event feed router - 公共路由 (与原客户端约定一致不鉴权)
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/events", get(events_handler))
}
