//! 错误处理模块
//!
//! 定义应用程序的错误类型和错误处理逻辑。

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// 会话未开始（缺少或无法解析的会话 Cookie）
    #[error("Session not started")]
    SessionNotStarted,

    /// 资源不存在
    #[error("Not found: {0}")]
    NotFound(String),

    /// 参数验证错误
    #[error("Invalid request: {0}")]
    Validation(String),

    /// 曲目编号超出目录范围
    #[error("Piece {id} is out of range (catalog has {len} pieces)")]
    OutOfRange { id: usize, len: usize },

    /// 目录加载错误
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(String),

    /// 上游服务错误（图片代理）
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Catalog(e.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(e: figment::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Upstream(e.to_string())
    }
}

/// Axum response implementation for AppError
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::SessionNotStarted = self {
            return (
                StatusCode::SEE_OTHER,
                [(header::LOCATION, "/")],
                self.to_string(),
            )
                .into_response();
        }

        let (status, code): (u16, String) = (&self).into();
        match status {
            500..=599 => tracing::error!("{}", self),
            _ => tracing::debug!("{}", self),
        }
        let body = Json(ErrorResponse::new(&code, &self.to_string()));
        (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body,
        )
            .into_response()
    }
}

/// 错误响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,
    /// 错误消息
    pub message: String,
    /// 详细信息
    pub details: Option<String>,
    /// 请求 ID
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// 创建新错误响应
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
            request_id: None,
        }
    }
}

/// HTTP 状态码映射
impl From<&AppError> for (u16, String) {
    fn from(err: &AppError) -> (u16, String) {
        match err {
            AppError::SessionNotStarted => (303, "SESSION_NOT_STARTED".to_string()),
            AppError::NotFound(_) => (404, "NOT_FOUND".to_string()),
            AppError::Validation(_) => (400, "BAD_REQUEST".to_string()),
            AppError::OutOfRange { .. } => (500, "OUT_OF_RANGE".to_string()),
            AppError::Upstream(_) => (502, "BAD_GATEWAY".to_string()),
            _ => (500, "INTERNAL_ERROR".to_string()),
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;
