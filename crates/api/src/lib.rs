//! # `autonome-api` - HTTP API 层
//!
//! 本 crate 是 Autonome 交易看板后端的 HTTP 服务入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - `/api/chat`：转换 UI 消息后调用模型网关，以 UI message stream 协议流式返回
//! - `/api/completion`：按固定结构生成三条通知
//! - `/api/trades` 与 `/api/models`：渲染成交面板
//! - 按鉴权配置中的受信任来源设置 CORS

pub mod error;
pub mod routes;
pub mod server;
pub mod stream;
pub mod types;
