//! # API 统一错误处理
//!
//! 将下层各 crate 的错误类型统一映射到 HTTP 状态码与 JSON 响应体。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use autonome_core::gateway::error::GatewayError;
use autonome_core::notification::error::NotificationError;
use autonome_core::trade::error::TradeError;

use crate::types::ApiErrorResponse;

/// API 层统一错误枚举
#[derive(Error, Debug)]
pub enum ApiError {
    /// 请求参数错误 (400)，在调用任何外部服务之前返回
    #[error("请求参数错误: {0}")]
    BadRequest(String),

    /// 模型服务调用失败或输出不合规 (502)
    #[error("上游服务错误: {0}")]
    Upstream(String),

    /// 下层业务错误 (500)
    #[error("内部服务错误: {0}")]
    Internal(String),
}

/// 将 `ApiError` 转换为 axum 的 HTTP 响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Upstream(msg) => {
                tracing::error!("上游服务错误: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Model gateway request failed".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                // 内部错误只记录日志，不向客户端透传细节
                tracing::error!("内部服务错误: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ApiErrorResponse::from_msg(message));
        (status, body).into_response()
    }
}

/// 从 `GatewayError` 转换，网关的任何失败都视为上游错误
impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

/// 模型输出不符合通知结构，同样属于上游错误
impl From<NotificationError> for ApiError {
    fn from(err: NotificationError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl From<TradeError> for ApiError {
    fn from(err: TradeError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
