use serde::{Deserialize, Serialize};

use crate::auth::entity::{AuthSchema, CookieAttributes};

/// 全局应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 模型网关配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// 模型服务根地址 (不含 `/v1`)
    pub base_url: String,
    /// Bearer API Key，来自 `MISTRAL_API_KEY`
    pub api_key: String,
    /// `/api/chat` 使用的模型
    pub chat_model: String,
    /// `/api/completion` 使用的模型
    pub completion_model: String,
    /// 单个请求 (含流式响应) 的最长持续时间
    pub max_duration_secs: u64,
}

/// 鉴权配置，启动时构造一次
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// sqlx 连接串，如 `sqlite://data/auth.db`
    pub database_url: String,
    /// 受信任的请求来源，来自 `CORS_ORIGIN`
    pub trusted_origins: Vec<String>,
    /// 是否启用邮箱 + 密码登录
    pub email_and_password: bool,
    pub cookie: CookieAttributes,
    pub schema: AuthSchema,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 滚动日志目录，为空时仅输出到终端
    pub dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.mistral.ai".to_string(),
            api_key: String::new(),
            chat_model: "codestral-latest".to_string(),
            completion_model: "codestral-latest".to_string(),
            max_duration_secs: 30,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://data/auth.db".to_string(),
            trusted_origins: vec![String::new()],
            email_and_password: true,
            cookie: CookieAttributes::default(),
            schema: AuthSchema::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: "logs".to_string(),
        }
    }
}

impl AuthConfig {
    /// 受信任来源中的非空项，空字符串 (未设置 `CORS_ORIGIN`) 不匹配任何来源
    pub fn effective_origins(&self) -> impl Iterator<Item = &str> {
        self.trusted_origins
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
    }
}
