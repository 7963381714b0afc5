//! Branch API Handlers

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::BranchRepository;
use crate::utils::validation::validate_branch_create;
use shared::{
    AppResult, Branch, BranchCreate, BranchListQuery, BranchPage, BranchUpdate, MessageResponse,
};

/// GET /api/branches - 分页查询网点
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<BranchListQuery>, QueryRejection>,
) -> AppResult<Json<BranchPage>> {
    let Query(query) = query?;
    let params = query.normalize();

    let repo = BranchRepository::new(state.get_db());
    let slice = repo.find_page(&params).await?;

    tracing::debug!(
        page = params.page,
        limit = params.limit,
        search = %params.search,
        total = slice.total,
        "Listed branches"
    );

    Ok(Json(BranchPage {
        branches: slice.branches,
        total_pages: params.total_pages(slice.total),
        current_page: params.page,
    }))
}

/// POST /api/branches - 创建网点
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<BranchCreate>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Branch>)> {
    let Json(payload) = payload?;
    let data = validate_branch_create(payload)?;

    let repo = BranchRepository::new(state.get_db());
    let branch = repo.create(data).await?;

    tracing::info!(id = %branch.id, code = %branch.code, "Branch created");
    Ok((StatusCode::CREATED, Json(branch)))
}

/// PUT /api/branches/{id} - 更新网点
///
/// 目标不存在时返回 `null` (200)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<BranchUpdate>, JsonRejection>,
) -> AppResult<Json<Option<Branch>>> {
    let Json(payload) = payload?;

    let repo = BranchRepository::new(state.get_db());
    let branch = repo.update(&id, payload).await?;

    match &branch {
        Some(b) => tracing::info!(id = %b.id, "Branch updated"),
        None => tracing::debug!(id = %id, "Update skipped, branch not found"),
    }
    Ok(Json(branch))
}

/// DELETE /api/branches/{id} - 删除网点 (硬删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = BranchRepository::new(state.get_db());
    repo.delete(&id).await?;

    tracing::info!(id = %id, "Branch deleted");
    Ok(Json(MessageResponse::branch_deleted()))
}
