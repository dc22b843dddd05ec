use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 请求超时（秒）
    pub request_timeout: u64,
}

/// 曲目目录配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// CSV 文件路径（作曲家, 标题, 调性, 图片地址）
    pub path: PathBuf,
    /// 样式表路径
    pub stylesheet: PathBuf,
}

/// 会话创建时机
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionCreation {
    /// 通过开始页面显式创建，并填写显示名称
    #[default]
    Named,
    /// 首次访问曲目页面时自动创建，显示名称为空
    Lazy,
}

/// 会话配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    /// 会话 Cookie 名称
    pub cookie_name: String,
    /// 会话创建时机
    pub creation: SessionCreation,
    /// 公开查看码长度（36 进制字符数）
    pub view_code_length: usize,
    /// 公开查看码冲突时的最大重试次数
    pub view_code_retries: usize,
}

/// 曲名部分匹配策略
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NameMatchPolicy {
    /// 按单词比对：正确词数 > 2 × 错误词数，且错误词数 ≤ 1
    #[default]
    WordOverlap,
    /// 标题包含猜测文本（早期策略）
    Substring,
}

/// 评分配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    /// 曲名部分匹配策略
    pub name_policy: NameMatchPolicy,
}

/// 图片代理配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ImageConfig {
    /// 是否代理图片（否则直接重定向）
    pub proxy_enabled: bool,
    /// 上游请求超时（秒）
    pub timeout: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录
    pub log_dir: Option<PathBuf>,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 曲目目录配置
    pub catalog: CatalogConfig,
    /// 会话配置
    pub session: SessionConfig,
    /// 评分配置
    pub scoring: ScoringConfig,
    /// 图片代理配置
    pub images: ImageConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
                request_timeout: 30,
            },
            catalog: CatalogConfig {
                path: PathBuf::from("incipits.csv"),
                stylesheet: PathBuf::from("style.css"),
            },
            session: SessionConfig {
                cookie_name: "sid".into(),
                creation: SessionCreation::Named,
                view_code_length: 5,
                view_code_retries: 16,
            },
            scoring: ScoringConfig {
                name_policy: NameMatchPolicy::WordOverlap,
            },
            images: ImageConfig {
                proxy_enabled: true,
                timeout: 10,
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            app_name: "incipit".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config
    }
}
