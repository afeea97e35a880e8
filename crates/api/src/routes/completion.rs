//! # 结构化通知路由

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tokio::time::{Duration, timeout};

use autonome_core::gateway::entity::ObjectRequest;
use autonome_core::gateway::error::GatewayError;
use autonome_core::notification::entity::{NOTIFICATION_SYSTEM_PROMPT, NotificationBatch};

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiErrorResponse, CompletionRequest};

/// 生成三条消息通知
///
/// 以固定的系统指令与通知结构调用模型网关，校验后整体返回。
/// 模型调用失败或输出不符合结构时返回 502，不会返回部分结果。
#[utoipa::path(
    post,
    path = "/api/completion",
    tag = "通知 (Completion)",
    request_body = CompletionRequest,
    responses(
        (status = 200, description = "三条通知", body = NotificationBatch),
        (status = 400, description = "请求体格式错误", body = ApiErrorResponse),
        (status = 502, description = "模型服务调用失败或输出不合规", body = ApiErrorResponse)
    )
)]
pub async fn completion(
    State(state): State<AppState>,
    payload: Result<Json<CompletionRequest>, JsonRejection>,
) -> Result<Json<NotificationBatch>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let max_secs = state.config.model.max_duration_secs;
    let request = ObjectRequest {
        model: state.config.model.completion_model.clone(),
        system: NOTIFICATION_SYSTEM_PROMPT.to_string(),
        prompt: req.prompt,
        schema: NotificationBatch::output_schema(),
    };

    let value = timeout(
        Duration::from_secs(max_secs),
        state.gateway.generate_object(request),
    )
    .await
    .map_err(|_| GatewayError::Timeout(max_secs))??;

    let batch = NotificationBatch::from_value(value)?;
    tracing::info!(count = batch.notifications.len(), "notifications generated");
    Ok(Json(batch))
}
