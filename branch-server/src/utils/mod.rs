//! 工具模块 - 日志初始化和输入校验

pub mod logger;
pub mod validation;
