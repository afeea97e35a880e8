use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use super::error::NotificationError;
use crate::gateway::entity::OutputSchema;

/// 每次生成的通知条数
pub const NOTIFICATION_COUNT: usize = 3;

/// 结构化通知生成使用的固定系统指令
pub const NOTIFICATION_SYSTEM_PROMPT: &str = "You generate three notifications for a messages app.";

/// # Summary
/// 一条由模型生成的消息通知。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    /// 虚构人物姓名
    #[schema(example = "Maya Chen")]
    pub name: String,
    /// 通知正文 (不含表情与链接)
    #[schema(example = "Are we still on for lunch?")]
    pub message: String,
    /// 距今分钟数
    #[serde(rename = "minutesAgo")]
    #[schema(example = 5)]
    pub minutes_ago: f64,
}

/// # Summary
/// 结构化通知接口的完整输出。
///
/// # Invariants
/// - 经 `from_value` 构造的实例恰好包含 `NOTIFICATION_COUNT` 条通知。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NotificationBatch {
    pub notifications: Vec<Notification>,
}

impl NotificationBatch {
    /// # Summary
    /// 将模型返回的原始 JSON 校验为通知批次。
    ///
    /// # Logic
    /// 1. 反序列化，字段缺失或类型不符即失败。
    /// 2. 校验条数与 `minutesAgo` 为有限数。
    ///
    /// # Returns
    /// * 校验通过的批次，或 `NotificationError`。
    pub fn from_value(value: Value) -> Result<Self, NotificationError> {
        let batch: NotificationBatch =
            serde_json::from_value(value).map_err(|e| NotificationError::Schema(e.to_string()))?;

        if batch.notifications.len() != NOTIFICATION_COUNT {
            return Err(NotificationError::Count {
                expected: NOTIFICATION_COUNT,
                actual: batch.notifications.len(),
            });
        }

        if let Some(idx) = batch
            .notifications
            .iter()
            .position(|n| !n.minutes_ago.is_finite())
        {
            return Err(NotificationError::InvalidMinutes(idx));
        }

        Ok(batch)
    }

    /// # Summary
    /// 发送给模型服务的输出 Schema。
    pub fn output_schema() -> OutputSchema {
        OutputSchema {
            name: "notifications".to_string(),
            schema: json!({
                "type": "object",
                "properties": {
                    "notifications": {
                        "type": "array",
                        "minItems": NOTIFICATION_COUNT,
                        "maxItems": NOTIFICATION_COUNT,
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": {
                                    "type": "string",
                                    "description": "Name of a fictional person."
                                },
                                "message": {
                                    "type": "string",
                                    "description": "Do not use emojis or links."
                                },
                                "minutesAgo": { "type": "number" }
                            },
                            "required": ["name", "message", "minutesAgo"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["notifications"],
                "additionalProperties": false
            }),
        }
    }
}
