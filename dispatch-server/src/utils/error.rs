//! 统一错误处理
//!
//! 提供应用级错误类型：
//! - [`AppError`] - 应用错误枚举，在 HTTP 边界映射为状态码
//!
//! 所有非 2xx 响应的 body 均为 `{ "message": string }`，与客户端约定一致。
//! 5xx 错误的细节只记录日志，不返回给调用方。

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// Error response body: `{ "message": string }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// 应用错误枚举
///
/// | 分类 | 说明 |
/// |------|------|
/// | 认证错误 | 未登录、令牌过期、无效令牌、角色不符 |
/// | 业务逻辑错误 | 资源不存在、重复标识、非法指派、非法状态流转 |
/// | 系统错误 | 数据库错误、内部错误 |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 认证错误 (4xx) ==========
    #[error("Access token required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Access denied: {0}")]
    Forbidden(String),

    // ========== 业务逻辑错误 (4xx) ==========
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate identifier: {0}")]
    Duplicate(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Order already assigned")]
    AlreadyAssigned,

    #[error("Rider is not available")]
    RiderUnavailable,

    #[error("Invalid status transition")]
    InvalidTransition,

    // ========== 系统错误 (5xx) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // Authentication errors (401)
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Access token required".into()),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired".into()),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token".into()),

            // Authorization errors (403)
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),

            // Not found (404)
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),

            // Bad request (400)
            AppError::Duplicate(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::AlreadyAssigned => {
                (StatusCode::BAD_REQUEST, "Order already assigned".into())
            }
            AppError::RiderUnavailable => {
                (StatusCode::BAD_REQUEST, "Rider is not available".into())
            }
            AppError::InvalidTransition => {
                (StatusCode::BAD_REQUEST, "Invalid status transition".into())
            }

            // Database errors (500) - details logged, not leaked
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".into())
            }

            // Internal errors (500)
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".into())
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

/// Missing or mistyped body fields are a 400 with the usual `{ message }`
/// body, not axum's default 422 with a plain-text body.
impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        tracing::debug!(error = %err, "request body rejected");
        AppError::Validation("Invalid request body".to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Duplicate(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Unified message to prevent email enumeration during login
    pub fn invalid_credentials() -> Self {
        Self::Validation("Invalid credentials".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
            (AppError::Forbidden("Access denied".into()), StatusCode::FORBIDDEN),
            (AppError::not_found("Order not found"), StatusCode::NOT_FOUND),
            (AppError::duplicate("Order ID already exists"), StatusCode::BAD_REQUEST),
            (AppError::AlreadyAssigned, StatusCode::BAD_REQUEST),
            (AppError::RiderUnavailable, StatusCode::BAD_REQUEST),
            (AppError::InvalidTransition, StatusCode::BAD_REQUEST),
            (AppError::database("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn server_errors_do_not_leak_details() {
        let resp = AppError::database("connection refused at 10.0.0.3").into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
