//! Handlers 模块
//!
//! HTTP 请求处理程序。

pub mod image_handler;
pub mod profile_handler;
pub mod quiz_handler;
pub mod session_handler;

pub use image_handler::*;
pub use profile_handler::*;
pub use quiz_handler::*;
pub use session_handler::{index, start};
