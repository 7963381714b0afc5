use thiserror::Error;

/// 服务器启动/运行错误
///
/// 请求级别的错误使用 [`shared::AppError`]，这里只覆盖进程生命周期。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("数据库初始化失败: {0}")]
    Database(String),

    #[error("端口绑定失败: {0}")]
    Bind(#[source] std::io::Error),

    #[error("HTTP 服务异常: {0}")]
    Serve(#[source] std::io::Error),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
