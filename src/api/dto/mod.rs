//! DTO 模块
//!
//! 表单与查询参数的反序列化结构。

pub mod quiz_dto;

pub use quiz_dto::*;
