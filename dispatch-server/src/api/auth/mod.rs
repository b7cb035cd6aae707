//! Authentication Routes
//!
//! All four routes are public — `require_auth` skips `/api/auth/*`.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Build authentication router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/restaurant-signup", post(handler::restaurant_signup))
        .route("/api/auth/rider-signup", post(handler::rider_signup))
        .route("/api/auth/admin-signup", post(handler::admin_signup))
        .route("/api/auth/login", post(handler::login))
}
