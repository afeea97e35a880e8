use std::time::Duration;

use async_trait::async_trait;
use autonome_core::chat::entity::ModelMessage;
use autonome_core::config::ModelConfig;
use autonome_core::gateway::entity::{ChatChunk, ChatRequest, ObjectRequest};
use autonome_core::gateway::error::GatewayError;
use autonome_core::gateway::port::{ChatStream, ModelGateway};
use futures::StreamExt;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::sse::SseDecoder;

/// 流式响应的终止帧
const DONE_MARKER: &str = "[DONE]";

/// # Summary
/// 基于 Mistral Chat Completions API 的模型网关实现。
///
/// # Invariants
/// - 每次调用恰好发出一个 HTTP 请求，不做重试。
/// - `timeout` 覆盖从建连到响应体 (含流式) 读取完毕的全过程。
#[derive(Clone)]
pub struct MistralGateway {
    /// 服务根地址，如 `https://api.mistral.ai`
    base_url: String,
    /// Bearer API Key
    api_key: String,
    /// 请求整体超时 (秒)，用于错误信息
    timeout_secs: u64,
    /// The HTTP client used for requests.
    client: Client,
}

impl MistralGateway {
    /// # Summary
    /// 创建新的 `MistralGateway`。
    ///
    /// # Logic
    /// 1. 安装 rustls 加密后端 (幂等)。
    /// 2. 以给定整体超时构建 reqwest 客户端。
    ///
    /// # Arguments
    /// * `base_url` - 服务根地址，末尾的 `/` 会被去除。
    /// * `api_key` - Bearer API Key。
    /// * `timeout_secs` - 单次请求最长持续时间。
    ///
    /// # Returns
    /// * 客户端构建失败时返回 `GatewayError::Network`。
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, GatewayError> {
        autonome_core::tls::install_default_provider();

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout_secs,
            client,
        })
    }

    /// 从全局模型配置构建
    pub fn from_config(config: &ModelConfig) -> Result<Self, GatewayError> {
        Self::new(&config.base_url, &config.api_key, config.max_duration_secs)
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    /// # Summary
    /// 发送请求并将非 2xx 状态映射为网关错误。
    async fn post(&self, body: &WireRequest<'_>) -> Result<Response, GatewayError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        tracing::warn!("Mistral API returned HTTP {}: {}", status, text);
        Err(match status {
            StatusCode::UNAUTHORIZED => GatewayError::Unauthorized(text),
            StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited,
            _ => GatewayError::Provider {
                status: status.as_u16(),
                body: text,
            },
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout(self.timeout_secs)
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl ModelGateway for MistralGateway {
    /// # Summary
    /// 以 `stream: true` 调用补全接口并逐帧转发文本增量。
    ///
    /// # Logic
    /// 1. 组装请求 (可选系统指令 + 对话历史)，发送并校验状态码。
    /// 2. 以字节流读取响应体，经 `SseDecoder` 切分为事件。
    /// 3. 每个事件解析为 JSON 帧，文本增量与结束原因按到达顺序推送；遇到 `[DONE]` 停止。
    ///
    /// # Returns
    /// * 增量流；握手阶段失败返回 `GatewayError`，之后的失败以流中的 `Err` 项传递。
    async fn stream_chat(&self, request: ChatRequest) -> Result<ChatStream, GatewayError> {
        let messages = wire_messages(request.system.as_deref(), &request.messages);
        let body = WireRequest {
            model: &request.model,
            messages,
            stream: true,
            response_format: None,
        };

        tracing::info!(
            "Opening chat stream: model={}, messages={}",
            request.model,
            request.messages.len()
        );
        let response = self.post(&body).await?;
        let mut bytes = response.bytes_stream();
        let gateway = self.clone();

        let stream = async_stream::try_stream! {
            let mut decoder = SseDecoder::default();
            let mut done = false;

            while !done {
                let Some(chunk) = bytes.next().await else {
                    break;
                };
                let chunk = chunk.map_err(|e| gateway.transport_error(e))?;

                for data in decoder.feed(&chunk)? {
                    if data == DONE_MARKER {
                        done = true;
                        break;
                    }
                    for item in parse_stream_frame(&data)? {
                        yield item;
                    }
                }
            }

            if !done {
                if let Some(data) = decoder.finish() {
                    if data != DONE_MARKER {
                        for item in parse_stream_frame(&data)? {
                            yield item;
                        }
                    }
                }
            }
            tracing::debug!("Chat stream closed");
        };

        Ok(Box::pin(stream))
    }

    /// # Summary
    /// 以 `json_schema` 响应格式调用补全接口，返回模型生成的 JSON 对象。
    ///
    /// # Logic
    /// 1. 消息序列为 [system, user(prompt)]，`response_format` 携带 strict Schema。
    /// 2. 读取首个 choice 的内容并按 JSON 解析。
    ///
    /// # Returns
    /// * 解析后的 JSON 值；内容缺失或不是合法 JSON 时返回 `GatewayError::Parse`。
    async fn generate_object(&self, request: ObjectRequest) -> Result<Value, GatewayError> {
        tracing::info!("Generating object: model={}, schema={}", request.model, request.schema.name);

        let prompt = [ModelMessage::User {
            content: request.prompt,
        }];
        let messages = wire_messages(Some(&request.system), &prompt);
        let body = WireRequest {
            model: &request.model,
            messages,
            stream: false,
            response_format: Some(json!({
                "type": "json_schema",
                "json_schema": {
                    "name": request.schema.name,
                    "schema": request.schema.schema,
                    "strict": true
                }
            })),
        };

        let response = self.post(&body).await?;
        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(MessageContent::into_text)
            .ok_or_else(|| GatewayError::Parse("No content in completion".into()))?;

        serde_json::from_str(&content)
            .map_err(|e| GatewayError::Parse(format!("Completion is not valid JSON: {}", e)))
    }
}

// ============================================================
//  Wire format
// ============================================================

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<Value>,
}

#[derive(Serialize, Debug, PartialEq)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<WireToolCall<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize, Debug, PartialEq)]
struct WireToolCall<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunction<'a>,
}

#[derive(Serialize, Debug, PartialEq)]
struct WireFunction<'a> {
    name: &'a str,
    arguments: &'a str,
}

impl<'a> WireMessage<'a> {
    fn plain(role: &'static str, content: &'a str) -> Self {
        Self {
            role,
            content,
            tool_calls: Vec::new(),
            tool_call_id: None,
            name: None,
        }
    }
}

impl<'a> From<&'a ModelMessage> for WireMessage<'a> {
    fn from(message: &'a ModelMessage) -> Self {
        match message {
            ModelMessage::System { content } => WireMessage::plain("system", content),
            ModelMessage::User { content } => WireMessage::plain("user", content),
            ModelMessage::Assistant {
                content,
                tool_calls,
            } => WireMessage {
                tool_calls: tool_calls
                    .iter()
                    .map(|c| WireToolCall {
                        id: &c.id,
                        kind: "function",
                        function: WireFunction {
                            name: &c.name,
                            arguments: &c.arguments,
                        },
                    })
                    .collect(),
                ..WireMessage::plain("assistant", content)
            },
            ModelMessage::Tool {
                tool_call_id,
                name,
                content,
            } => WireMessage {
                tool_call_id: Some(tool_call_id),
                name: Some(name),
                ..WireMessage::plain("tool", content)
            },
        }
    }
}

fn wire_messages<'a>(system: Option<&'a str>, messages: &'a [ModelMessage]) -> Vec<WireMessage<'a>> {
    system
        .map(|s| WireMessage::plain("system", s))
        .into_iter()
        .chain(messages.iter().map(WireMessage::from))
        .collect()
}

/// 消息内容：纯文本，或 (推理模型返回的) 分段数组
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Deserialize, Debug)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl MessageContent {
    fn into_text(self) -> String {
        match self {
            MessageContent::Text(t) => t,
            MessageContent::Parts(parts) => parts
                .into_iter()
                .filter(|p| p.kind == "text")
                .filter_map(|p| p.text)
                .collect(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize, Debug)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize, Debug)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<MessageContent>,
}

#[derive(Deserialize, Debug)]
struct StreamFrame {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize, Debug)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct StreamDelta {
    #[serde(default)]
    content: Option<MessageContent>,
}

/// 将一个 SSE 事件解析为零或多个对话增量
fn parse_stream_frame(data: &str) -> Result<Vec<ChatChunk>, GatewayError> {
    let frame: StreamFrame = serde_json::from_str(data)
        .map_err(|e| GatewayError::Parse(format!("Bad stream frame: {}", e)))?;

    let mut chunks = Vec::new();
    for choice in frame.choices {
        if let Some(text) = choice.delta.content.map(MessageContent::into_text) {
            if !text.is_empty() {
                chunks.push(ChatChunk::TextDelta(text));
            }
        }
        if let Some(reason) = choice.finish_reason {
            chunks.push(ChatChunk::Finish {
                reason: Some(reason),
            });
        }
    }
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autonome_core::chat::entity::ToolCall;

    #[test]
    fn test_parse_text_frame() {
        let chunks = parse_stream_frame(
            r#"{"id":"x","choices":[{"index":0,"delta":{"role":"assistant","content":"Hel"},"finish_reason":null}]}"#,
        )
        .unwrap();
        assert_eq!(chunks, vec![ChatChunk::TextDelta("Hel".into())]);
    }

    #[test]
    fn test_parse_finish_frame() {
        let chunks = parse_stream_frame(
            r#"{"choices":[{"index":0,"delta":{"content":""},"finish_reason":"stop"}]}"#,
        )
        .unwrap();
        assert_eq!(
            chunks,
            vec![ChatChunk::Finish {
                reason: Some("stop".into())
            }]
        );
    }

    #[test]
    fn test_parse_content_parts() {
        let chunks = parse_stream_frame(
            r#"{"choices":[{"delta":{"content":[{"type":"thinking","thinking":[]},{"type":"text","text":"ok"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(chunks, vec![ChatChunk::TextDelta("ok".into())]);
    }

    #[test]
    fn test_bad_frame_is_parse_error() {
        assert!(matches!(
            parse_stream_frame("not json"),
            Err(GatewayError::Parse(_))
        ));
    }

    #[test]
    fn test_wire_messages_layout() {
        let history = vec![
            ModelMessage::User {
                content: "hi".into(),
            },
            ModelMessage::Assistant {
                content: String::new(),
                tool_calls: vec![ToolCall {
                    id: "c1".into(),
                    name: "getPrice".into(),
                    arguments: "{}".into(),
                }],
            },
            ModelMessage::Tool {
                tool_call_id: "c1".into(),
                name: "getPrice".into(),
                content: "1".into(),
            },
        ];
        let wire = wire_messages(Some("be brief"), &history);
        let value = serde_json::to_value(&wire).unwrap();
        assert_eq!(
            value,
            json!([
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "", "tool_calls": [
                    {"id": "c1", "type": "function", "function": {"name": "getPrice", "arguments": "{}"}}
                ]},
                {"role": "tool", "content": "1", "tool_call_id": "c1", "name": "getPrice"}
            ])
        );
    }
}
