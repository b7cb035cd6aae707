//! Admin Handlers

use axum::{Json, extract::State};
use shared::client::AdminStats;

use crate::AppError;
use crate::core::ServerState;

/// GET /api/admin/stats — platform-wide counts
///
/// `activeRiders` counts riders currently *available* for assignment
/// (matching the dashboard's wording), not riders on a delivery.
pub async fn stats(State(state): State<ServerState>) -> Result<Json<AdminStats>, AppError> {
    let total_restaurants = state.restaurants.count().await?;
    let total_riders = state.riders.count().await?;
    let active_riders = state.riders.count_available().await?;
    let total_orders = state.orders.count().await?;

    Ok(Json(AdminStats {
        total_restaurants,
        total_riders,
        active_riders,
        total_orders,
    }))
}
