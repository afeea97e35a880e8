//! # 鉴权探针路由

use axum::Json;
use axum::extract::State;

use crate::server::AppState;
use crate::types::AuthOkResponse;

/// 鉴权服务探针
///
/// 鉴权配置在启动时已完成初始化，能走到这里即说明数据库与表结构可用。
#[utoipa::path(
    get,
    path = "/api/auth/ok",
    tag = "鉴权 (Auth)",
    responses(
        (status = 200, description = "鉴权服务可用", body = AuthOkResponse)
    )
)]
pub async fn auth_ok(State(state): State<AppState>) -> Json<AuthOkResponse> {
    tracing::debug!(provider = state.auth.provider(), "auth probe");
    Json(AuthOkResponse { ok: true })
}
