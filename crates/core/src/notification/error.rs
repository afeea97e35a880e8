use thiserror::Error;

/// # Summary
/// 结构化通知校验错误。模型输出不满足 Schema 时整体拒绝，不做部分修复。
#[derive(Error, Debug)]
pub enum NotificationError {
    /// 字段缺失或类型不符
    #[error("Schema mismatch: {0}")]
    Schema(String),

    /// 通知条数不等于约定数量
    #[error("Expected {expected} notifications, got {actual}")]
    Count { expected: usize, actual: usize },

    /// 数值字段不是有限数
    #[error("Invalid minutesAgo for notification {0}")]
    InvalidMinutes(usize),
}
