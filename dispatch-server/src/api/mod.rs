//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查接口
//! - [`auth`] - 注册与登录接口
//! - [`orders`] - 订单管理接口
//! - [`riders`] - 骑手接口
//! - [`admin`] - 平台统计接口
//! - [`events`] - 事件推送 (WebSocket)
//!
//! 认证在 Router 级别统一应用 (`require_auth` 内部跳过公共路由)，
//! 角色授权在各资源路由上以 `require_role` 层叠加。

pub mod admin;
pub mod auth;
pub mod events;
pub mod health;
pub mod orders;
pub mod riders;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();
    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(auth::router())
        .merge(health::router())
        .merge(events::router())
        .merge(orders::router())
        .merge(riders::router())
        .merge(admin::router())
}

/// Build the complete application with state and middleware
pub fn build_router(state: ServerState) -> Router {
    build_app()
        // JWT 认证中间件 - 在 Router 级别应用，require_auth 内部会跳过公共路由
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(log_request))
}
