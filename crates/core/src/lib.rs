//! # `autonome-core` - 领域核心
//!
//! 定义 Autonome 各子系统共享的实体、端口 (Trait) 与错误类型。
//! 本 crate 不包含任何 I/O 实现，具体实现由 `gateway` / `auth` / `dashboard` 等 crate 提供。

pub mod auth;
pub mod chat;
pub mod config;
pub mod gateway;
pub mod notification;
pub mod tls;
pub mod trade;
