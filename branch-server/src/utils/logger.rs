//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.
//! `RUST_LOG` 优先于配置中的日志级别。

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

const LOG_FILE_PREFIX: &str = "branch-server";

/// Initialize the logger (info level, stdout)
pub fn init_logger() -> anyhow::Result<()> {
    init_logger_with_file(None, false, None)
}

/// Initialize the logger with optional file output
///
/// - `json`: 输出 JSON 格式 (生产环境)
/// - `log_dir`: 存在时额外写入按天滚动的日志文件
pub fn init_logger_with_file(
    log_level: Option<&str>,
    json: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level.unwrap_or("info")))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        std::fs::create_dir_all(dir)?;
    }

    let result = match (log_dir, json) {
        (Some(dir), true) => {
            let file = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            builder
                .json()
                .with_writer(std::io::stdout.and(file))
                .try_init()
        }
        (Some(dir), false) => {
            let file = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            builder.with_writer(std::io::stdout.and(file)).try_init()
        }
        (None, true) => builder.json().try_init(),
        (None, false) => builder.try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))
}
