use thiserror::Error;

/// # Summary
/// 模型网关错误枚举，覆盖网络、鉴权、限流及响应解析等失败场景。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 网关不做重试，任何错误都原样上抛给调用方。
#[derive(Error, Debug)]
pub enum GatewayError {
    /// 网络连接或传输错误
    #[error("Network error: {0}")]
    Network(String),

    /// API Key 缺失或无效 (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 触发上游限流 (429)
    #[error("Rate limited by provider")]
    RateLimited,

    /// 上游返回的其他非 2xx 状态
    #[error("Provider error (HTTP {status}): {body}")]
    Provider { status: u16, body: String },

    /// 响应体无法解析 (JSON / SSE 帧格式不符)
    #[error("Parse error: {0}")]
    Parse(String),

    /// 超出请求允许的最长时长
    #[error("Request exceeded {0} seconds")]
    Timeout(u64),
}
