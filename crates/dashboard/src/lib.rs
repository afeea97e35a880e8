//! # `autonome-dashboard` - 交易看板视图模型
//!
//! 为浏览器端的成交侧边栏提供数据：模型信息表、演示成交数据源、
//! 按模型筛选与标签页状态，以及货币 / 数量 / 时间的格式化渲染。

pub mod demo;
pub mod format;
pub mod models;
pub mod view;
