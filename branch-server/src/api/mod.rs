//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`branches`] - 网点管理接口

pub mod branches;
pub mod health;
