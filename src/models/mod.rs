//! 核心数据模型模块
//!
//! 定义测验的核心数据结构：CatalogEntry, Guess, MatchOutcome, SessionRecord。

pub mod incipit;
pub mod outcome;
pub mod session;

pub use incipit::*;
pub use outcome::*;
pub use session::*;
