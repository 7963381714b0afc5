//! Branch Server - 网点管理 API 服务
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储 (`branch` 表, `code` 唯一索引)
//! - **HTTP API** (`api`): 网点 CRUD + 健康检查
//! - **路由** (`routes`): 路由注册与 Tower 中间件栈
//!
//! # 模块结构
//!
//! ```text
//! branch-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (连接 + repository)
//! ├── middleware/    # 请求日志
//! ├── routes/        # Router 组装
//! └── utils/         # 日志、校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod middleware;
pub mod routes;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerError, ServerState};
pub use routes::{build_app, build_router};
pub use shared::{AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境: 加载 `.env` 并初始化日志
pub fn setup_environment() -> anyhow::Result<Config> {
    // .env 不存在时忽略
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.is_production(),
        config.log_dir.as_deref(),
    )?;
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    ____                       __
   / __ )_________ _____  _____/ /_
  / __  / ___/ __ `/ __ \/ ___/ __ \
 / /_/ / /  / /_/ / / / / /__/ / / /
/_____/_/   \__,_/_/ /_/\___/_/ /_/
    "#
    );
}
