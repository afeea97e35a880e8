//! # 路由控制器
//!
//! 每个子模块对应一组 HTTP 接口，均通过 `utoipa::path` 注册到 OpenAPI 文档。

pub mod auth;
pub mod chat;
pub mod completion;
pub mod trades;
