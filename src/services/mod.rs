//! 服务模块

pub mod catalog;
pub mod codec;
pub mod evaluator;
pub mod quiz;
pub mod session;

pub use catalog::Catalog;
pub use evaluator::{MatchEvaluator, WordOverlap};
pub use quiz::{Attempt, QuizService};
pub use session::{SessionService, SessionServiceImpl, SessionStore, create_session_service};
