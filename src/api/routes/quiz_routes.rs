//! Quiz Routes
//!
//! 定义测验页面的路由。

use crate::api::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::app_state::AppState;

/// 创建测验路由器
pub fn create_quiz_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/start", post(start))
        .route("/piece", get(piece))
        .route("/submit", post(submit))
        .route("/result", get(result))
        .route("/profile", get(profile))
        .route("/images/:file", get(image))
}
