//! 健康检查路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 健康检查 (含数据库探测) |
//!
//! # 响应示例
//!
//! ```json
//! { "status": "ok", "version": "0.1.0" }
//! ```

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use shared::HealthResponse;

use crate::core::ServerState;
use crate::db::repository::BranchRepository;

/// 健康检查路由 - 公共路由
pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// GET /health - 健康检查
///
/// 数据库不可用时返回 503 + `status: "error"`
pub async fn health(State(state): State<ServerState>) -> (StatusCode, Json<HealthResponse>) {
    let repo = BranchRepository::new(state.get_db());
    let (code, status) = match repo.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "error")
        }
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
