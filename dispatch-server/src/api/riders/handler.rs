//! Rider Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::client::{OrderView, RiderProfileView};

use crate::AppError;
use crate::core::ServerState;
use crate::db::models::RiderProfile;
use crate::db::repository::parse_record;

fn profile_view(profile: &RiderProfile) -> RiderProfileView {
    RiderProfileView {
        id: profile.id_string(),
        name: profile.name.clone(),
        status: profile.status,
        current_order: profile.current_order.as_ref().map(|o| o.to_string()),
    }
}

/// GET /api/riders/available — riders a manager can assign, by name
pub async fn list_available(
    State(state): State<ServerState>,
) -> Result<Json<Vec<RiderProfileView>>, AppError> {
    let profiles = state.riders.list_available().await?;
    Ok(Json(profiles.iter().map(profile_view).collect()))
}

/// GET /api/riders/{rider_id}/order — current delivery, `null` when idle
pub async fn current_order(
    State(state): State<ServerState>,
    Path(rider_id): Path<String>,
) -> Result<Json<Option<OrderView>>, AppError> {
    let current = state.dispatch.current_order_for(&rider_id).await?;
    Ok(Json(current))
}

/// GET /api/riders/{rider_id}/completed-rides — delivered orders, newest first
pub async fn completed_rides(
    State(state): State<ServerState>,
    Path(rider_id): Path<String>,
) -> Result<Json<Vec<OrderView>>, AppError> {
    let account = parse_record("account", &rider_id)?;
    let profile = state
        .riders
        .find_by_account(account)
        .await?
        .ok_or_else(|| AppError::not_found("Rider not found"))?;
    let profile_id = profile
        .id
        .ok_or_else(|| AppError::internal("rider profile missing id"))?;
    let rides = state.orders.list_delivered_for_rider(profile_id).await?;
    Ok(Json(rides))
}
