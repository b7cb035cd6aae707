use thiserror::Error;

/// 服务器启动/运行期错误
///
/// 请求级错误见 [`crate::utils::AppError`]；这里只覆盖进程层面的失败
/// (绑定端口、初始化数据库等)。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

/// 服务器生命周期的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
