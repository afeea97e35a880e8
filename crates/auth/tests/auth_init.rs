use anyhow::Result;
use autonome_auth::Auth;
use autonome_core::auth::entity::AuthSchema;
use autonome_core::auth::error::AuthError;
use autonome_core::config::AuthConfig;
use tempfile::tempdir;

fn config_for(url: String) -> AuthConfig {
    AuthConfig {
        database_url: url,
        ..AuthConfig::default()
    }
}

async fn table_names(auth: &Auth) -> Result<Vec<String>> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .fetch_all(auth.pool())
            .await?;
    Ok(rows.into_iter().map(|r| r.0).collect())
}

#[tokio::test]
async fn test_init_creates_schema_tables() -> Result<()> {
    let dir = tempdir()?;
    let db = dir.path().join("nested").join("auth.db");
    let auth = Auth::init(config_for(format!("sqlite://{}", db.display()))).await?;

    assert!(db.exists());
    let tables = table_names(&auth).await?;
    for expected in ["account", "session", "user", "verification"] {
        assert!(tables.contains(&expected.to_string()), "missing {}", expected);
    }
    assert_eq!(auth.provider(), "sqlite");
    assert!(auth.email_and_password_enabled());

    // 重复初始化不报错
    let again = Auth::init(config_for(format!("sqlite://{}", db.display()))).await?;
    assert_eq!(table_names(&again).await?.len(), tables.len());
    Ok(())
}

#[tokio::test]
async fn test_init_honours_custom_table_names() -> Result<()> {
    let dir = tempdir()?;
    let db = dir.path().join("auth.db");
    let config = AuthConfig {
        database_url: format!("sqlite://{}", db.display()),
        schema: AuthSchema {
            user: "app_user".into(),
            session: "app_session".into(),
            account: "app_account".into(),
            verification: "app_verification".into(),
        },
        ..AuthConfig::default()
    };
    let auth = Auth::init(config).await?;

    let tables = table_names(&auth).await?;
    assert!(tables.contains(&"app_user".to_string()));
    assert!(!tables.contains(&"user".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_bad_database_path_fails() -> Result<()> {
    let dir = tempdir()?;
    // 以普通文件作为目录，无法创建数据库
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory")?;
    let db = blocker.join("auth.db");

    let result = Auth::init(config_for(format!("sqlite://{}", db.display()))).await;
    assert!(matches!(result, Err(AuthError::Database(_))));
    Ok(())
}

#[tokio::test]
async fn test_invalid_table_name_is_config_error() -> Result<()> {
    let dir = tempdir()?;
    let config = AuthConfig {
        database_url: format!("sqlite://{}", dir.path().join("auth.db").display()),
        schema: AuthSchema {
            session: "session; DROP TABLE user".into(),
            ..AuthSchema::default()
        },
        ..AuthConfig::default()
    };
    assert!(matches!(Auth::init(config).await, Err(AuthError::Config(_))));
    Ok(())
}

#[tokio::test]
async fn test_cookie_and_origins() -> Result<()> {
    let dir = tempdir()?;
    let config = AuthConfig {
        database_url: format!("sqlite://{}", dir.path().join("auth.db").display()),
        trusted_origins: vec!["https://autonome.app".into()],
        ..AuthConfig::default()
    };
    let auth = Auth::init(config).await?;

    let header = auth.cookie().render("autonome.session_token", "t0k");
    assert!(header.contains("SameSite=None"));
    assert!(header.contains("; Secure"));
    assert!(header.contains("; HttpOnly"));

    assert!(auth.is_trusted_origin("https://autonome.app"));
    assert!(!auth.is_trusted_origin("https://evil.example"));
    assert!(!auth.is_trusted_origin(""));
    Ok(())
}

#[tokio::test]
async fn test_unset_cors_origin_trusts_nothing() -> Result<()> {
    let dir = tempdir()?;
    let auth = Auth::init(config_for(format!(
        "sqlite://{}",
        dir.path().join("auth.db").display()
    )))
    .await?;

    assert_eq!(auth.trusted_origins(), &[String::new()]);
    assert!(!auth.is_trusted_origin(""));
    assert!(!auth.is_trusted_origin("http://localhost:3001"));
    Ok(())
}
