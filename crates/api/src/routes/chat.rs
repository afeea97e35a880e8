//! # 流式对话路由

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::sse::{KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use tokio::time::{Duration, Instant, timeout_at};

use autonome_core::chat::convert::convert_to_model_messages;
use autonome_core::gateway::entity::ChatRequest as GatewayChatRequest;
use autonome_core::gateway::error::GatewayError;

use crate::error::ApiError;
use crate::server::AppState;
use crate::stream::{UI_MESSAGE_STREAM_HEADER, UI_MESSAGE_STREAM_VERSION, ui_message_stream};
use crate::types::{ApiErrorResponse, ChatRequest};

/// 与模型流式对话
///
/// 将 UI 消息历史转换为模型消息后调用一次模型网关，
/// 以 UI message stream 协议 (SSE) 逐块返回生成的文本。
/// 整个响应 (含流式传输) 不超过配置的最长时长。
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "对话 (Chat)",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "UI message stream", content_type = "text/event-stream", body = String),
        (status = 400, description = "请求体格式错误", body = ApiErrorResponse),
        (status = 502, description = "模型服务调用失败", body = ApiErrorResponse)
    )
)]
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let max_secs = state.config.model.max_duration_secs;
    let deadline = Instant::now() + Duration::from_secs(max_secs);

    let request = GatewayChatRequest {
        model: state.config.model.chat_model.clone(),
        system: None,
        messages: convert_to_model_messages(&req.messages),
    };
    tracing::info!(
        model = %request.model,
        ui_messages = req.messages.len(),
        model_messages = request.messages.len(),
        "chat request"
    );

    let upstream = timeout_at(deadline, state.gateway.stream_chat(request))
        .await
        .map_err(|_| GatewayError::Timeout(max_secs))??;

    let sse = Sse::new(ui_message_stream(upstream, deadline, max_secs)).keep_alive(KeepAlive::default());
    Ok((
        [(UI_MESSAGE_STREAM_HEADER, UI_MESSAGE_STREAM_VERSION)],
        sse,
    )
        .into_response())
}
