//! Shared test setup: full router over an in-memory SurrealDB

#![allow(dead_code)]

use axum::Router;
use branch_client::{BranchApi, OneshotHttpClient};
use branch_server::{Config, ServerState, build_app};
use shared::{Branch, BranchCreate};

/// Fresh in-memory database per call
pub async fn app() -> Router {
    let config = Config::with_overrides("mem://", 0);
    let state = ServerState::initialize(&config)
        .await
        .expect("in-memory database");
    build_app().with_state(state)
}

pub async fn api() -> BranchApi<OneshotHttpClient> {
    BranchApi::new(OneshotHttpClient::new(app().await))
}

pub fn payload(name: &str, code: &str, city: &str) -> BranchCreate {
    BranchCreate {
        name: Some(name.to_string()),
        code: Some(code.to_string()),
        address: Some("1 Main St".to_string()),
        city: Some(city.to_string()),
        state: Some("IL".to_string()),
        ..Default::default()
    }
}

pub async fn create(
    api: &BranchApi<OneshotHttpClient>,
    name: &str,
    code: &str,
    city: &str,
) -> Branch {
    api.create(&payload(name, code, city))
        .await
        .expect("create branch")
}
