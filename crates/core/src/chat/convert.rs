use super::entity::{ModelMessage, Role, ToolCall, ToolState, UiMessage, UiPart};

/// # Summary
/// 将浏览器端的 UI 消息序列转换为模型调用格式。
///
/// # Logic
/// 1. system / user 消息：拼接全部文本片段 (换行分隔)，其他片段忽略。
/// 2. assistant 消息：以 `step-start` 为界切分为若干步骤，每一步生成一条 assistant 消息，
///    已有结果的工具调用随附在该消息上，并紧跟对应的 tool 结果消息。
/// 3. 尚无结果的工具调用 (输入中) 与推理片段不会发送给模型。
///
/// # Arguments
/// * `messages` - UI 消息序列，顺序即对话顺序。
///
/// # Returns
/// * 转换后的模型消息，保持原有先后顺序。空输入返回空序列。
pub fn convert_to_model_messages(messages: &[UiMessage]) -> Vec<ModelMessage> {
    let mut out = Vec::with_capacity(messages.len());

    for message in messages {
        match message.role {
            Role::System => out.push(ModelMessage::System {
                content: join_text(&message.parts),
            }),
            Role::User => out.push(ModelMessage::User {
                content: join_text(&message.parts),
            }),
            Role::Assistant => {
                for step in message.parts.split(|p| matches!(p, UiPart::StepStart)) {
                    push_assistant_step(step, &mut out);
                }
            }
        }
    }

    out
}

fn join_text(parts: &[UiPart]) -> String {
    parts
        .iter()
        .filter_map(|p| match p {
            UiPart::Text { text } => Some(text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_assistant_step(step: &[UiPart], out: &mut Vec<ModelMessage>) {
    let content = join_text(step);
    let mut tool_calls = Vec::new();
    let mut results = Vec::new();

    for part in step {
        let UiPart::Tool {
            name,
            tool_call_id,
            state,
            input,
            output,
            error_text,
        } = part
        else {
            continue;
        };

        let result = match state {
            ToolState::OutputAvailable => output
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "null".to_string()),
            ToolState::OutputError => error_text.clone().unwrap_or_default(),
            ToolState::InputStreaming | ToolState::InputAvailable => {
                tracing::debug!("skip pending tool call {} ({})", tool_call_id, name);
                continue;
            }
        };

        tool_calls.push(ToolCall {
            id: tool_call_id.clone(),
            name: name.clone(),
            arguments: input
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "{}".to_string()),
        });
        results.push(ModelMessage::Tool {
            tool_call_id: tool_call_id.clone(),
            name: name.clone(),
            content: result,
        });
    }

    if content.is_empty() && tool_calls.is_empty() {
        return;
    }

    out.push(ModelMessage::Assistant {
        content,
        tool_calls,
    });
    out.extend(results);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(t: &str) -> UiPart {
        UiPart::Text { text: t.into() }
    }

    fn msg(role: Role, parts: Vec<UiPart>) -> UiMessage {
        UiMessage {
            id: String::new(),
            role,
            parts,
        }
    }

    #[test]
    fn test_empty_history() {
        assert!(convert_to_model_messages(&[]).is_empty());
    }

    #[test]
    fn test_user_text_parts_are_joined() {
        let converted = convert_to_model_messages(&[msg(
            Role::User,
            vec![
                text("first"),
                UiPart::File {
                    media_type: "image/png".into(),
                    url: "data:".into(),
                },
                text("second"),
            ],
        )]);
        assert_eq!(
            converted,
            vec![ModelMessage::User {
                content: "first\nsecond".into()
            }]
        );
    }

    #[test]
    fn test_assistant_steps_and_tool_results() {
        let converted = convert_to_model_messages(&[
            msg(Role::User, vec![text("price of ETH?")]),
            msg(
                Role::Assistant,
                vec![
                    UiPart::StepStart,
                    UiPart::Reasoning {
                        text: "look it up".into(),
                    },
                    UiPart::Tool {
                        name: "getPrice".into(),
                        tool_call_id: "call_1".into(),
                        state: ToolState::OutputAvailable,
                        input: Some(json!({"symbol": "ETH"})),
                        output: Some(json!({"price": 3744.7})),
                        error_text: None,
                    },
                    UiPart::Tool {
                        name: "getPrice".into(),
                        tool_call_id: "call_2".into(),
                        state: ToolState::InputAvailable,
                        input: None,
                        output: None,
                        error_text: None,
                    },
                    UiPart::StepStart,
                    text("ETH trades at $3,744.70"),
                ],
            ),
        ]);

        assert_eq!(converted.len(), 4);
        assert_eq!(
            converted[1],
            ModelMessage::Assistant {
                content: String::new(),
                tool_calls: vec![ToolCall {
                    id: "call_1".into(),
                    name: "getPrice".into(),
                    arguments: r#"{"symbol":"ETH"}"#.into(),
                }],
            }
        );
        assert_eq!(
            converted[2],
            ModelMessage::Tool {
                tool_call_id: "call_1".into(),
                name: "getPrice".into(),
                content: r#"{"price":3744.7}"#.into(),
            }
        );
        assert_eq!(
            converted[3],
            ModelMessage::Assistant {
                content: "ETH trades at $3,744.70".into(),
                tool_calls: vec![],
            }
        );
    }

    #[test]
    fn test_tool_error_is_forwarded_as_result() {
        let converted = convert_to_model_messages(&[msg(
            Role::Assistant,
            vec![UiPart::Tool {
                name: "getPrice".into(),
                tool_call_id: "c".into(),
                state: ToolState::OutputError,
                input: None,
                output: None,
                error_text: Some("feed offline".into()),
            }],
        )]);
        assert_eq!(
            converted[1],
            ModelMessage::Tool {
                tool_call_id: "c".into(),
                name: "getPrice".into(),
                content: "feed offline".into(),
            }
        );
    }
}
