use surrealdb::Surreal;
use surrealdb::engine::any::Any;

use crate::core::{Config, Result};
use crate::db::DbService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// `Surreal<Any>` 内部已是 Arc，克隆成本极低，可直接作为 axum State。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Any> | 文档数据库连接 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库连接 (SurrealDB)
    pub db: Surreal<Any>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 代替
    pub fn new(config: Config, db: Surreal<Any>) -> Self {
        Self { config, db }
    }

    /// 初始化服务器状态: 连接数据库并确保表结构存在
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db_service = DbService::connect(config).await?;
        Ok(Self::new(config.clone(), db_service.db))
    }

    /// 获取数据库连接
    pub fn get_db(&self) -> Surreal<Any> {
        self.db.clone()
    }
}
