//! Routes 模块
//!
//! 定义页面路由。

pub mod quiz_routes;
