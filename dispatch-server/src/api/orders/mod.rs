//! Order Routes
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 角色 |
//! |------|------|------|------|
//! | /api/orders | GET | 本餐厅订单 (最新在前) | manager |
//! | /api/orders | POST | 创建订单 | manager |
//! | /api/orders/{order_id}/assign | PUT | 指派骑手 | manager |
//! | /api/orders/{order_id}/status | PUT | 推进订单状态 | rider |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};
use shared::types::Role;

use crate::auth::require_role;
use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let manager = Router::new()
        .route("/", get(handler::list_orders).post(handler::create_order))
        .route("/{order_id}/assign", put(handler::assign_rider))
        .route_layer(middleware::from_fn(require_role(Role::Manager)));

    let rider = Router::new()
        .route("/{order_id}/status", put(handler::update_status))
        .route_layer(middleware::from_fn(require_role(Role::Rider)));

    manager.merge(rider)
}
