use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chat::entity::ModelMessage;

/// # Summary
/// 一次流式对话调用的参数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// 模型标识，如 `codestral-latest`
    pub model: String,
    /// 可选的系统指令，置于消息序列之前
    pub system: Option<String>,
    /// 已转换的对话历史 (允许为空)
    pub messages: Vec<ModelMessage>,
}

/// # Summary
/// 流式对话产生的增量片段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChatChunk {
    /// 文本增量，按到达顺序拼接即为完整回复
    TextDelta(String),
    /// 上游宣告结束及其原因 (如 `stop`、`length`)
    Finish { reason: Option<String> },
}

/// # Summary
/// 结构化输出约束：名称 + JSON Schema。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSchema {
    pub name: String,
    pub schema: Value,
}

/// # Summary
/// 一次结构化对象生成调用的参数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub schema: OutputSchema,
}
