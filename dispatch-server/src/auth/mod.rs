//! 认证模块
//!
//! - [`jwt`] - JWT 令牌服务与 Claims
//! - [`middleware`] - 认证与角色校验中间件
//! - [`extractor`] - `CurrentUser` 提取器

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_role};
