use autonome_core::gateway::error::GatewayError;

/// # Summary
/// 增量式 `text/event-stream` 解码器。
///
/// # Invariants
/// - 输入字节可以在任意位置切分 (包括 UTF-8 多字节字符中间)，只有完整的行才会被解析。
/// - 只关心 `data` 字段；注释行 (`:` 开头) 与其他字段被忽略。
/// - 多行 `data` 以 `\n` 拼接为一个事件。
#[derive(Debug, Default)]
pub struct SseDecoder {
    // 尚未遇到换行的残余字节
    pending: Vec<u8>,
    // 当前事件已累积的 data 行
    data: Vec<String>,
}

impl SseDecoder {
    /// # Summary
    /// 喂入一段原始字节，返回其中已完整结束的事件数据。
    ///
    /// # Logic
    /// 1. 追加到残余缓冲区，逐行切出完整行 (兼容 `\r\n`)。
    /// 2. 空行结束当前事件。
    ///
    /// # Returns
    /// * 按到达顺序排列的事件 data；行不是合法 UTF-8 时返回 `GatewayError::Parse`。
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<String>, GatewayError> {
        self.pending.extend_from_slice(chunk);
        let mut events = Vec::new();

        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.pending.drain(..=pos).collect();
            let line = std::str::from_utf8(&raw)
                .map_err(|e| GatewayError::Parse(format!("invalid utf-8 in event stream: {}", e)))?
                .trim_end_matches(['\n', '\r']);

            if line.is_empty() {
                if !self.data.is_empty() {
                    events.push(self.data.join("\n"));
                    self.data.clear();
                }
                continue;
            }
            if line.starts_with(':') {
                continue;
            }

            let (field, value) = match line.split_once(':') {
                Some((f, v)) => (f, v.strip_prefix(' ').unwrap_or(v)),
                None => (line, ""),
            };
            if field == "data" {
                self.data.push(value.to_string());
            }
        }

        Ok(events)
    }

    /// # Summary
    /// 连接结束时冲刷未以空行结尾的最后一个事件。
    pub fn finish(&mut self) -> Option<String> {
        if let Ok(tail) = std::str::from_utf8(&self.pending) {
            if let Some(value) = tail.trim_end_matches('\r').strip_prefix("data:") {
                self.data.push(value.strip_prefix(' ').unwrap_or(value).to_string());
            }
        }
        self.pending.clear();

        if self.data.is_empty() {
            None
        } else {
            let event = self.data.join("\n");
            self.data.clear();
            Some(event)
        }
    }
}
