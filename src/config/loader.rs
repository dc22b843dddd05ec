use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 优先级（后者覆盖前者）：
    /// 1. 内置默认值（`environment = "production"` 时使用生产预设）
    /// 2. ./incipit.toml（或 `INCIPIT_CONFIG` 指定的文件）
    /// 3. `INCIPIT_` 前缀的环境变量，`__` 分隔层级
    /// 4. `PORT` 环境变量
    pub fn load() -> Result<AppConfig, figment::Error> {
        let path = std::env::var("INCIPIT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_config_path());
        Self::load_from(path)
    }

    /// 从指定路径加载配置
    pub fn load_from(path: PathBuf) -> Result<AppConfig, figment::Error> {
        Self::figment(path).extract()
    }

    fn figment(path: PathBuf) -> Figment {
        // The environment name itself may come from any layer, so resolve it
        // over development defaults before picking the preset.
        let environment: String = Self::layered(AppConfig::development(), &path)
            .extract_inner("environment")
            .unwrap_or_default();
        let defaults = match environment.as_str() {
            "production" => AppConfig::production(),
            _ => AppConfig::development(),
        };
        Self::layered(defaults, &path)
    }

    fn layered(defaults: AppConfig, path: &Path) -> Figment {
        Figment::from(Serialized::defaults(defaults))
            .merge(Toml::file(path))
            .merge(Env::prefixed("INCIPIT_").ignore(&["config"]).split("__"))
            .merge(Env::raw().only(&["port"]).map(|_| "server.port".into()))
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.catalog.path.as_os_str().is_empty() {
            return Err(ConfigValidationError::MissingCatalogPath);
        }

        if config.session.cookie_name.trim().is_empty() {
            return Err(ConfigValidationError::MissingCookieName);
        }

        if !(1..=12).contains(&config.session.view_code_length) {
            return Err(ConfigValidationError::InvalidViewCodeLength(
                config.session.view_code_length,
            ));
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("server port must be greater than 0")]
    InvalidPort,

    #[error("catalog path is not configured")]
    MissingCatalogPath,

    #[error("session cookie name is not configured")]
    MissingCookieName,

    #[error("view code length must be between 1 and 12, got {0}")]
    InvalidViewCodeLength(usize),
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("incipit.toml")
}
