//! Branch Client - HTTP client for the branch API
//!
//! - [`client`] - HTTP 传输 (网络 / 进程内 oneshot)
//! - [`api`] - 类型化 API 调用
//! - [`spreadsheet`] - 表格导入导出
//! - [`view`] - 登录门和管理界面状态机
//! - [`runner`] - 副作用执行器

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod runner;
pub mod spreadsheet;
pub mod view;

pub use api::BranchApi;
pub use client::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use runner::EffectRunner;
