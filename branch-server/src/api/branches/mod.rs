//! Branch API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/branches | GET | 分页列表 (search / sortBy / sortOrder) |
//! | /api/branches | POST | 创建网点 |
//! | /api/branches/{id} | PUT | 更新网点 (不存在时返回 null) |
//! | /api/branches/{id} | DELETE | 删除网点 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/branches", get(handler::list).post(handler::create))
        .route(
            "/api/branches/{id}",
            axum::routing::put(handler::update).delete(handler::delete),
        )
}
