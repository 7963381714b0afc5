/// 服务器配置 - 网点管理服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (启动时会先加载 `.env`)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_URL | rocksdb://data/branch-management | SurrealDB 连接串 (`mem://` 为内存库) |
/// | DATABASE_NS | branch | SurrealDB namespace |
/// | DATABASE_NAME | branch_management | SurrealDB database |
/// | PORT | 5000 | HTTP 服务端口 |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_DIR | - | 日志目录，设置后按天滚动写文件 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// DATABASE_URL=mem:// PORT=8080 cargo run -p branch-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// SurrealDB 连接串
    pub database_url: String,
    /// SurrealDB namespace
    pub database_ns: String,
    /// SurrealDB database
    pub database_name: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 默认日志级别
    pub log_level: String,
    /// 日志目录 (可选)
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
}

pub const DEFAULT_DATABASE_URL: &str = "rocksdb://data/branch-management";
pub const DEFAULT_HTTP_PORT: u16 = 5000;

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.into()),
            database_ns: std::env::var("DATABASE_NS").unwrap_or_else(|_| "branch".into()),
            database_name: std::env::var("DATABASE_NAME")
                .unwrap_or_else(|_| "branch_management".into()),
            http_port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_HTTP_PORT),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(database_url: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.database_url = database_url.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
