//! # 配置加载
//!
//! 分层合并：内置默认值 → 可选的 `config/autonome.toml` → `AUTONOME__` 前缀环境变量，
//! 最后应用 `CORS_ORIGIN` 与 `MISTRAL_API_KEY` 两个约定俗成的变量。

use std::collections::HashMap;
use std::env;
use std::path::Path;

use autonome_core::config::AppConfig;
use config::{Config, Environment, File};
use thiserror::Error;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_FILE: &str = "config/autonome.toml";

/// 启动配置错误，均为致命错误
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("MISTRAL_API_KEY is not set")]
    MissingApiKey,
}

/// 从默认路径与进程环境加载配置
pub fn load() -> Result<AppConfig, SettingsError> {
    load_with(Path::new(DEFAULT_CONFIG_FILE), None)
}

/// # Summary
/// 按层加载配置。
///
/// # Arguments
/// * `file` - 可选的 TOML 配置文件，不存在时跳过。
/// * `vars` - 环境变量表，`None` 时读取进程环境。
///
/// # Returns
/// * 合并后的配置；任何一层解析失败或缺少 API Key 时返回错误。
pub fn load_with(
    file: &Path,
    vars: Option<HashMap<String, String>>,
) -> Result<AppConfig, SettingsError> {
    let settings = Config::builder()
        .add_source(Config::try_from(&AppConfig::default())?)
        .add_source(File::from(file).required(false))
        .add_source(
            Environment::with_prefix("AUTONOME")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(vars.clone()),
        )
        .build()?;
    let mut config: AppConfig = settings.try_deserialize()?;

    let lookup = |key: &str| match &vars {
        Some(map) => map.get(key).cloned(),
        None => env::var(key).ok(),
    };

    if let Some(origin) = lookup("CORS_ORIGIN") {
        config.auth.trusted_origins = vec![origin];
    }
    if let Some(key) = lookup("MISTRAL_API_KEY") {
        config.model.api_key = key;
    }
    if config.model.api_key.trim().is_empty() {
        return Err(SettingsError::MissingApiKey);
    }

    Ok(config)
}
