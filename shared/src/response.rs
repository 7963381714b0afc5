//! API Response types

use serde::{Deserialize, Serialize};

use crate::models::Branch;

/// Message returned by `DELETE /api/branches/{id}`
pub const BRANCH_DELETED_MESSAGE: &str = "Branch deleted successfully";

/// One page of branches
///
/// ```json
/// { "branches": [ ... ], "totalPages": 3, "currentPage": 1 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchPage {
    pub branches: Vec<Branch>,
    pub total_pages: u64,
    pub current_page: u64,
}

/// Plain acknowledgment body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn branch_deleted() -> Self {
        Self::new(BRANCH_DELETED_MESSAGE)
    }
}

/// `GET /health` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// ok | error
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_json_shape() {
        let page = BranchPage {
            branches: vec![],
            total_pages: 0,
            current_page: 1,
        };
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"branches": [], "totalPages": 0, "currentPage": 1})
        );
    }

    #[test]
    fn test_deleted_message() {
        let value = serde_json::to_value(MessageResponse::branch_deleted()).unwrap();
        assert_eq!(value["message"], "Branch deleted successfully");
    }
}
