//! Shared types for the branch management service
//!
//! Common types used by branch-server and branch-client: the branch
//! model, list query/response structures and the unified error system.

pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorBody, ErrorCode};
pub use models::{Branch, BranchCreate, BranchStatus, BranchUpdate};
pub use request::{BranchListQuery, ListParams, SortField, SortOrder};
pub use response::{BranchPage, HealthResponse, MessageResponse};
