//! Order Handlers
//!
//! Manager routes are scoped to the manager's own restaurant; the
//! restaurant is resolved from the authenticated account, never from the
//! request. Mutations that touch order + rider go through the dispatch
//! engine.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use shared::client::{AssignRiderRequest, CreateOrderRequest, OrderView, UpdateStatusRequest};
use shared::event::DispatchEvent;

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Restaurant;
use crate::db::repository::parse_record;

async fn restaurant_of(state: &ServerState, user: &CurrentUser) -> Result<Restaurant, AppError> {
    let manager = parse_record("account", &user.id)?;
    state
        .restaurants
        .find_by_manager(manager)
        .await?
        .ok_or_else(|| AppError::not_found("Restaurant not found"))
}

/// GET /api/orders — the manager's restaurant's orders, newest first
pub async fn list_orders(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<Vec<OrderView>>, AppError> {
    let restaurant = restaurant_of(&state, &user).await?;
    let restaurant_id = restaurant
        .id
        .ok_or_else(|| AppError::internal("restaurant missing id"))?;
    let orders = state.orders.list_view_for_restaurant(restaurant_id).await?;
    Ok(Json(orders))
}

/// POST /api/orders — create an order at PREP
pub async fn create_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderView>), AppError> {
    let Json(req) = payload?;
    let restaurant = restaurant_of(&state, &user).await?;
    let restaurant_id = restaurant
        .id
        .ok_or_else(|| AppError::internal("restaurant missing id"))?;

    let order = state
        .orders
        .create(restaurant_id, &req.order_id, &req.items, req.prep_time)
        .await?;
    let order_id = order
        .id
        .ok_or_else(|| AppError::internal("order missing id"))?;
    let view = state
        .orders
        .find_view(order_id)
        .await?
        .ok_or_else(|| AppError::internal("created order vanished"))?;

    tracing::info!(order = %view.order_id, restaurant = %view.restaurant_name, "order created");
    state
        .broadcaster
        .publish(DispatchEvent::order_created(view.clone()));
    Ok((StatusCode::CREATED, Json(view)))
}

/// PUT /api/orders/{order_id}/assign — assign a rider (profile id in body)
pub async fn assign_rider(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
    payload: Result<Json<AssignRiderRequest>, JsonRejection>,
) -> Result<Json<OrderView>, AppError> {
    let Json(req) = payload?;
    let view = state.dispatch.assign(&order_id, &req.rider_id).await?;
    Ok(Json(view))
}

/// PUT /api/orders/{order_id}/status — advance one lifecycle step
///
/// The acting rider comes from the token, not the request body. A status
/// string outside the four lifecycle states fails deserialization and is
/// reported as a 400, not a 422.
pub async fn update_status(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
    user: CurrentUser,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<OrderView>, AppError> {
    let Json(req) = payload.map_err(|_| AppError::validation("Invalid status"))?;
    let view = state.dispatch.advance(&order_id, req.status, &user.id).await?;
    Ok(Json(view))
}
