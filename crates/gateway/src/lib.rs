//! # `autonome-gateway` - 模型网关客户端
//!
//! 通过 Mistral Chat Completions HTTP API 实现 `ModelGateway` 端口：
//! 流式对话 (SSE) 与按 JSON Schema 约束的结构化对象生成。

pub mod mistral;
pub mod sse;
