//! # UI 消息流编码
//!
//! 把模型网关的增量输出编码为前端聊天组件消费的 UI message stream
//! (SSE 上的一组带 `type` 字段的 JSON 帧，以 `[DONE]` 结尾)。

use async_stream::stream;
use axum::response::sse::Event;
use futures::{Stream, StreamExt};
use serde::Serialize;
use tokio::time::{Instant, timeout_at};
use uuid::Uuid;

use autonome_core::gateway::entity::ChatChunk;
use autonome_core::gateway::port::ChatStream;

/// 标识响应协议版本的响应头
pub const UI_MESSAGE_STREAM_HEADER: &str = "x-vercel-ai-ui-message-stream";
pub const UI_MESSAGE_STREAM_VERSION: &str = "v1";

/// 流结束标记
const DONE: &str = "[DONE]";

/// 上游中途失败时返回给客户端的固定文案
pub const STREAM_FAILED_TEXT: &str = "Model gateway stream failed";

/// # Summary
/// UI message stream 的帧类型。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiChunk {
    Start {
        #[serde(rename = "messageId")]
        message_id: String,
    },
    StartStep,
    TextStart {
        id: String,
    },
    TextDelta {
        id: String,
        delta: String,
    },
    TextEnd {
        id: String,
    },
    FinishStep,
    Finish,
    Error {
        #[serde(rename = "errorText")]
        error_text: String,
    },
}

fn frame(chunk: &UiChunk) -> Result<Event, axum::Error> {
    Event::default().json_data(chunk)
}

/// # Summary
/// 将网关的文本流转换为 UI message stream 帧序列。
///
/// # Logic
/// 1. 先发送 `start` 与 `start-step`。
/// 2. 第一个非空增量前补发 `text-start`，之后每个增量原样转发为 `text-delta`，不做缓冲。
/// 3. 上游正常结束：`text-end` (若已开始)、`finish-step`、`finish`。
/// 4. 上游出错或超过 `deadline`：发送 `error` 帧并结束。上游错误细节只记录日志。
/// 5. 最后总是发送 `[DONE]`。
///
/// # Arguments
/// * `upstream` - 网关返回的文本流。
/// * `deadline` - 整个响应允许持续到的时刻。
/// * `max_secs` - 用于错误提示的最长秒数。
///
/// # Invariants
/// - 丢弃返回的流即丢弃 `upstream`，上游连接随之取消。
pub fn ui_message_stream(
    upstream: ChatStream,
    deadline: Instant,
    max_secs: u64,
) -> impl Stream<Item = Result<Event, axum::Error>> + Send + 'static {
    stream! {
        let message_id = format!("msg-{}", Uuid::new_v4().simple());
        let text_id = format!("txt-{}", Uuid::new_v4().simple());
        let mut upstream = upstream;
        let mut text_open = false;
        let mut failed = false;

        yield frame(&UiChunk::Start { message_id });
        yield frame(&UiChunk::StartStep);

        loop {
            match timeout_at(deadline, upstream.next()).await {
                Err(_) => {
                    tracing::warn!(max_secs, "chat stream exceeded its deadline");
                    yield frame(&UiChunk::Error {
                        error_text: format!("Response exceeded {} seconds", max_secs),
                    });
                    failed = true;
                    break;
                }
                Ok(None) => break,
                Ok(Some(Ok(ChatChunk::TextDelta(delta)))) => {
                    if delta.is_empty() {
                        continue;
                    }
                    if !text_open {
                        text_open = true;
                        yield frame(&UiChunk::TextStart { id: text_id.clone() });
                    }
                    yield frame(&UiChunk::TextDelta { id: text_id.clone(), delta });
                }
                Ok(Some(Ok(ChatChunk::Finish { reason }))) => {
                    tracing::debug!(?reason, "upstream finished");
                }
                Ok(Some(Err(e))) => {
                    tracing::error!("chat stream failed: {}", e);
                    yield frame(&UiChunk::Error { error_text: STREAM_FAILED_TEXT.to_string() });
                    failed = true;
                    break;
                }
            }
        }

        if !failed {
            if text_open {
                yield frame(&UiChunk::TextEnd { id: text_id.clone() });
            }
            yield frame(&UiChunk::FinishStep);
            yield frame(&UiChunk::Finish);
        }

        yield Ok(Event::default().data(DONE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chunk_wire_format() {
        assert_eq!(
            serde_json::to_value(UiChunk::Start {
                message_id: "m1".into()
            })
            .unwrap(),
            json!({"type": "start", "messageId": "m1"})
        );
        assert_eq!(
            serde_json::to_value(UiChunk::StartStep).unwrap(),
            json!({"type": "start-step"})
        );
        assert_eq!(
            serde_json::to_value(UiChunk::TextDelta {
                id: "t".into(),
                delta: "hi".into()
            })
            .unwrap(),
            json!({"type": "text-delta", "id": "t", "delta": "hi"})
        );
        assert_eq!(
            serde_json::to_value(UiChunk::Error {
                error_text: "boom".into()
            })
            .unwrap(),
            json!({"type": "error", "errorText": "boom"})
        );
        assert_eq!(
            serde_json::to_value(UiChunk::Finish).unwrap(),
            json!({"type": "finish"})
        );
    }
}
