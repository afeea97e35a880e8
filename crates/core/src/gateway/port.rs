use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde_json::Value;

use super::entity::{ChatChunk, ChatRequest, ObjectRequest};
use super::error::GatewayError;

/// # Summary
/// 对话增量流别名，使用动态分发的异步流。
pub type ChatStream = Pin<Box<dyn Stream<Item = Result<ChatChunk, GatewayError>> + Send>>;

/// # Summary
/// 托管语言模型服务的访问接口 (Port)。
///
/// # Invariants
/// - 实现必须是 `Send` 和 `Sync` 以支持并发请求。
/// - 每次方法调用恰好对应一次上游请求，不做重试。
/// - 丢弃 `ChatStream` 即取消上游请求。
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// # Summary
    /// 发起流式对话补全。
    ///
    /// # Logic
    /// 1. 将消息序列发送至上游模型服务并开启流式响应。
    /// 2. 上游每产生一个增量即向流中推送一个 `ChatChunk`，不缓冲完整回复。
    ///
    /// # Arguments
    /// * `request` - 模型标识与对话历史。
    ///
    /// # Returns
    /// * 成功建立连接返回增量流；握手阶段失败返回 `GatewayError`。
    async fn stream_chat(&self, request: ChatRequest) -> Result<ChatStream, GatewayError>;

    /// # Summary
    /// 按给定 JSON Schema 生成单个结构化对象。
    ///
    /// # Arguments
    /// * `request` - 系统指令、提示词与输出 Schema。
    ///
    /// # Returns
    /// * 上游返回的 JSON 对象 (尚未做业务层校验)。
    async fn generate_object(&self, request: ObjectRequest) -> Result<Value, GatewayError>;
}
