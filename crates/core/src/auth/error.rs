use thiserror::Error;

/// # Summary
/// 鉴权配置错误。均在进程启动阶段出现，视为致命错误，不做重试。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
pub enum AuthError {
    /// 配置缺失或非法 (如来源地址无法解析)
    #[error("Configuration error: {0}")]
    Config(String),
    /// 数据库连接失败
    #[error("Database error: {0}")]
    Database(String),
    /// 表结构初始化失败
    #[error("Schema error: {0}")]
    Schema(String),
}
