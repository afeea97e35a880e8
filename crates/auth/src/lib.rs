//! # Autonome Auth
//!
//! 鉴权配置的运行时对象：持有 SQLite 连接池、表结构与 Cookie 策略。
//! 进程启动时构建一次，之后只读共享。

use autonome_core::auth::entity::{AuthSchema, CookieAttributes};
use autonome_core::auth::error::AuthError;
use autonome_core::config::AuthConfig;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::fs;
use std::str::FromStr;

/// 数据库提供方标识
pub const PROVIDER: &str = "sqlite";

/// # Summary
/// 已初始化的鉴权配置。
///
/// # Invariants
/// * 构建成功即表示数据库可连接且四张鉴权表均已存在。
/// * 构建后不可变，失败不重试。
#[derive(Debug, Clone)]
pub struct Auth {
    pool: SqlitePool,
    config: AuthConfig,
}

impl Auth {
    /// # Summary
    /// 连接数据库并初始化鉴权表结构。
    ///
    /// # Logic
    /// 1. 校验表名，只允许字母、数字与下划线。
    /// 2. 解析连接串并开启 `create_if_missing`，确保数据库文件所在目录存在。
    /// 3. 连接数据库，逐表执行 `CREATE TABLE IF NOT EXISTS`。
    ///
    /// # Arguments
    /// * `config` - 鉴权配置。
    ///
    /// # Returns
    /// * `Result<Self, AuthError>` - 配置非法、连接失败或建表失败时返回错误。
    pub async fn init(config: AuthConfig) -> Result<Self, AuthError> {
        for table in config.schema.tables() {
            validate_identifier(table)?;
        }

        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|e| AuthError::Config(format!("invalid database url: {}", e)))?
            .create_if_missing(true);

        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| AuthError::Database(e.to_string()))?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?;

        for ddl in schema_ddl(&config.schema) {
            sqlx::query(&ddl)
                .execute(&pool)
                .await
                .map_err(|e| AuthError::Schema(e.to_string()))?;
        }

        tracing::info!(
            provider = PROVIDER,
            origins = ?config.trusted_origins,
            email_and_password = config.email_and_password,
            "auth initialized"
        );

        Ok(Self { pool, config })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn provider(&self) -> &'static str {
        PROVIDER
    }

    pub fn cookie(&self) -> &CookieAttributes {
        &self.config.cookie
    }

    /// 原样保存的受信任来源 (可能包含空字符串)
    pub fn trusted_origins(&self) -> &[String] {
        &self.config.trusted_origins
    }

    pub fn email_and_password_enabled(&self) -> bool {
        self.config.email_and_password
    }

    /// # Summary
    /// 检查来源是否受信任。空白来源永远不匹配。
    pub fn is_trusted_origin(&self, origin: &str) -> bool {
        let origin = origin.trim();
        !origin.is_empty() && self.config.effective_origins().any(|o| o == origin)
    }
}

fn validate_identifier(name: &str) -> Result<(), AuthError> {
    let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AuthError::Config(format!("invalid table name: {:?}", name)))
    }
}

/// 鉴权表的建表语句，按外键依赖顺序排列
fn schema_ddl(schema: &AuthSchema) -> Vec<String> {
    vec![
        format!(
            r#"CREATE TABLE IF NOT EXISTS "{user}" (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                emailVerified INTEGER NOT NULL DEFAULT 0,
                image TEXT,
                createdAt DATETIME NOT NULL,
                updatedAt DATETIME NOT NULL
            )"#,
            user = schema.user
        ),
        format!(
            r#"CREATE TABLE IF NOT EXISTS "{session}" (
                id TEXT PRIMARY KEY,
                expiresAt DATETIME NOT NULL,
                token TEXT NOT NULL UNIQUE,
                createdAt DATETIME NOT NULL,
                updatedAt DATETIME NOT NULL,
                ipAddress TEXT,
                userAgent TEXT,
                userId TEXT NOT NULL REFERENCES "{user}"(id) ON DELETE CASCADE
            )"#,
            session = schema.session,
            user = schema.user
        ),
        format!(
            r#"CREATE TABLE IF NOT EXISTS "{account}" (
                id TEXT PRIMARY KEY,
                accountId TEXT NOT NULL,
                providerId TEXT NOT NULL,
                userId TEXT NOT NULL REFERENCES "{user}"(id) ON DELETE CASCADE,
                accessToken TEXT,
                refreshToken TEXT,
                idToken TEXT,
                accessTokenExpiresAt DATETIME,
                refreshTokenExpiresAt DATETIME,
                scope TEXT,
                password TEXT,
                createdAt DATETIME NOT NULL,
                updatedAt DATETIME NOT NULL
            )"#,
            account = schema.account,
            user = schema.user
        ),
        format!(
            r#"CREATE TABLE IF NOT EXISTS "{verification}" (
                id TEXT PRIMARY KEY,
                identifier TEXT NOT NULL,
                value TEXT NOT NULL,
                expiresAt DATETIME NOT NULL,
                createdAt DATETIME,
                updatedAt DATETIME
            )"#,
            verification = schema.verification
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("user").is_ok());
        assert!(validate_identifier("auth_session2").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("user\"; DROP").is_err());
    }

    #[test]
    fn test_ddl_uses_configured_names() {
        let schema = AuthSchema {
            user: "app_user".into(),
            ..AuthSchema::default()
        };
        let ddl = schema_ddl(&schema);
        assert_eq!(ddl.len(), 4);
        assert!(ddl[0].contains(r#""app_user""#));
        assert!(ddl[1].contains(r#"REFERENCES "app_user"(id)"#));
    }
}
