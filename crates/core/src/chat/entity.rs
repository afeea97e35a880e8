use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// # Summary
/// 对话参与方角色。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 系统指令
    System,
    /// 终端用户
    User,
    /// 模型回复
    Assistant,
}

/// # Summary
/// 浏览器聊天界面提交的一条消息 (UI message)。
///
/// # Invariants
/// - 消息一经发送不可修改，`parts` 的顺序即为渲染顺序。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UiMessage {
    /// 客户端生成的消息 ID
    #[serde(default)]
    #[schema(example = "msg_01")]
    pub id: String,
    /// 消息角色
    pub role: Role,
    /// 消息内容片段
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub parts: Vec<UiPart>,
}

/// # Summary
/// 工具调用在界面侧的生命周期状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolState {
    InputStreaming,
    InputAvailable,
    OutputAvailable,
    OutputError,
}

/// # Summary
/// UI 消息的单个内容片段。
///
/// # Invariants
/// - `type` 字段以 `tool-` 开头的片段一律解析为 `Tool`，工具名为前缀之后的部分。
/// - 未识别的片段类型保留为 `Other`，转换为模型消息时被忽略。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPart", into = "RawPart")]
pub enum UiPart {
    Text {
        text: String,
    },
    Reasoning {
        text: String,
    },
    File {
        media_type: String,
        url: String,
    },
    StepStart,
    Tool {
        name: String,
        tool_call_id: String,
        state: ToolState,
        input: Option<Value>,
        output: Option<Value>,
        error_text: Option<String>,
    },
    Other {
        kind: String,
    },
}

/// 线上格式，字段名与浏览器端保持一致 (camelCase)。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    state: Option<ToolState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    input: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_text: Option<String>,
}

impl TryFrom<RawPart> for UiPart {
    type Error = String;

    fn try_from(raw: RawPart) -> Result<Self, Self::Error> {
        let missing = |field: &str| format!("part `{}` is missing `{}`", raw.kind, field);
        match raw.kind.as_str() {
            "text" => Ok(UiPart::Text {
                text: raw.text.clone().ok_or_else(|| missing("text"))?,
            }),
            "reasoning" => Ok(UiPart::Reasoning {
                text: raw.text.clone().ok_or_else(|| missing("text"))?,
            }),
            "file" => Ok(UiPart::File {
                media_type: raw.media_type.clone().ok_or_else(|| missing("mediaType"))?,
                url: raw.url.clone().ok_or_else(|| missing("url"))?,
            }),
            "step-start" => Ok(UiPart::StepStart),
            kind => match kind.strip_prefix("tool-") {
                Some(name) if !name.is_empty() => Ok(UiPart::Tool {
                    name: name.to_string(),
                    tool_call_id: raw.tool_call_id.clone().ok_or_else(|| missing("toolCallId"))?,
                    state: raw.state.ok_or_else(|| missing("state"))?,
                    input: raw.input,
                    output: raw.output,
                    error_text: raw.error_text,
                }),
                _ => Ok(UiPart::Other {
                    kind: kind.to_string(),
                }),
            },
        }
    }
}

impl From<UiPart> for RawPart {
    fn from(part: UiPart) -> Self {
        match part {
            UiPart::Text { text } => RawPart {
                kind: "text".into(),
                text: Some(text),
                ..Default::default()
            },
            UiPart::Reasoning { text } => RawPart {
                kind: "reasoning".into(),
                text: Some(text),
                ..Default::default()
            },
            UiPart::File { media_type, url } => RawPart {
                kind: "file".into(),
                media_type: Some(media_type),
                url: Some(url),
                ..Default::default()
            },
            UiPart::StepStart => RawPart {
                kind: "step-start".into(),
                ..Default::default()
            },
            UiPart::Tool {
                name,
                tool_call_id,
                state,
                input,
                output,
                error_text,
            } => RawPart {
                kind: format!("tool-{}", name),
                tool_call_id: Some(tool_call_id),
                state: Some(state),
                input,
                output,
                error_text,
                ..Default::default()
            },
            UiPart::Other { kind } => RawPart {
                kind,
                ..Default::default()
            },
        }
    }
}

/// # Summary
/// 发往模型服务的一次工具调用。`arguments` 为 JSON 编码后的字符串。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

/// # Summary
/// 模型调用格式的消息，由 UI 消息转换而来。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ModelMessage {
    System {
        content: String,
    },
    User {
        content: String,
    },
    Assistant {
        content: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCall>,
    },
    Tool {
        tool_call_id: String,
        name: String,
        content: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_tool_part() {
        let part: UiPart = serde_json::from_value(json!({
            "type": "tool-getPrice",
            "toolCallId": "call_1",
            "state": "output-available",
            "input": {"symbol": "ETH"},
            "output": {"price": 3744.7}
        }))
        .unwrap();

        match part {
            UiPart::Tool {
                name,
                tool_call_id,
                state,
                ..
            } => {
                assert_eq!(name, "getPrice");
                assert_eq!(tool_call_id, "call_1");
                assert_eq!(state, ToolState::OutputAvailable);
            }
            other => panic!("unexpected part: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_part_is_kept() {
        let part: UiPart = serde_json::from_value(json!({"type": "source-url", "url": "x"})).unwrap();
        assert_eq!(
            part,
            UiPart::Other {
                kind: "source-url".into()
            }
        );
    }

    #[test]
    fn test_text_part_requires_text() {
        let result = serde_json::from_value::<UiPart>(json!({"type": "text"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_message_serializes_in_wire_format() {
        let msg = UiMessage {
            id: "m1".into(),
            role: Role::User,
            parts: vec![UiPart::Text { text: "hi".into() }],
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({"id": "m1", "role": "user", "parts": [{"type": "text", "text": "hi"}]})
        );
    }
}
