//! Incipit - 乐曲片段竞猜服务
//!
//! 展示一段乐谱开头，让访客猜测曲名、作曲家与调性，并按匹配程度计分。
//! 每位访客的进度保存在以 Cookie 为键的内存会话中。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod security;
pub mod services;
