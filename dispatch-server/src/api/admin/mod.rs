//! Admin Routes

mod handler;

use axum::{Router, middleware, routing::get};
use shared::types::Role;

use crate::auth::require_role;
use crate::core::ServerState;

/// Admin router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/stats", get(handler::stats))
        .route_layer(middleware::from_fn(require_role(Role::Admin)))
}
