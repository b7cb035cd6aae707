//! Rider Routes
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 角色 |
//! |------|------|------|------|
//! | /api/riders/available | GET | 空闲骑手列表 | manager |
//! | /api/riders/{rider_id}/order | GET | 当前配送订单 (或 null) | rider |
//! | /api/riders/{rider_id}/completed-rides | GET | 已送达订单 | rider |
//!
//! `rider_id` 是骑手的 *账号* id，与客户端存的登录身份一致；
//! 指派接口用的则是骑手 profile id (见 orders 路由)。

mod handler;

use axum::{Router, middleware, routing::get};
use shared::types::Role;

use crate::auth::require_role;
use crate::core::ServerState;

/// Rider router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/riders", routes())
}

fn routes() -> Router<ServerState> {
    let manager = Router::new()
        .route("/available", get(handler::list_available))
        .route_layer(middleware::from_fn(require_role(Role::Manager)));

    let rider = Router::new()
        .route("/{rider_id}/order", get(handler::current_order))
        .route("/{rider_id}/completed-rides", get(handler::completed_rides))
        .route_layer(middleware::from_fn(require_role(Role::Rider)));

    manager.merge(rider)
}
