//! Typed branch API
//!
//! Thin wrapper over any [`HttpClient`] transport.

use serde::Serialize;
use shared::{
    Branch, BranchCreate, BranchListQuery, BranchPage, BranchUpdate, HealthResponse,
    MessageResponse,
};

use crate::ClientResult;
use crate::client::HttpClient;

const BRANCHES_PATH: &str = "/api/branches";

/// Build the `GET /api/branches` path with a percent-encoded query string
pub fn list_path(query: &BranchListQuery) -> String {
    let pairs = query
        .to_pairs()
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{BRANCHES_PATH}?{pairs}")
}

fn branch_path(id: &str) -> String {
    format!("{BRANCHES_PATH}/{}", urlencoding::encode(id))
}

/// Branch API client
#[derive(Debug, Clone)]
pub struct BranchApi<H> {
    http: H,
}

impl<H: HttpClient> BranchApi<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    /// Underlying transport
    pub fn http(&self) -> &H {
        &self.http
    }

    /// GET /api/branches
    pub async fn list(&self, query: &BranchListQuery) -> ClientResult<BranchPage> {
        self.http.get(&list_path(query)).await
    }

    /// POST /api/branches
    pub async fn create(&self, data: &BranchCreate) -> ClientResult<Branch> {
        self.create_raw(data).await
    }

    /// POST /api/branches with an arbitrary JSON body (spreadsheet rows)
    pub async fn create_raw<B: Serialize + Sync>(&self, body: &B) -> ClientResult<Branch> {
        self.http.post(BRANCHES_PATH, body).await
    }

    /// PUT /api/branches/{id}; `None` when the id does not exist
    pub async fn update(&self, id: &str, data: &BranchUpdate) -> ClientResult<Option<Branch>> {
        self.http.put(&branch_path(id), data).await
    }

    /// DELETE /api/branches/{id}
    pub async fn delete(&self, id: &str) -> ClientResult<MessageResponse> {
        self.http.delete(&branch_path(id)).await
    }

    /// GET /health
    pub async fn health(&self) -> ClientResult<HealthResponse> {
        self.http.get("/health").await
    }
}
