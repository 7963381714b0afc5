//! Data models
//!
//! Shared between branch-server and its clients (via API).

pub mod branch;

// Re-exports
pub use branch::*;
