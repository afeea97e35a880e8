mod logging;
mod settings;

use std::sync::Arc;

use autonome_api::server::{AppState, start_server};
use autonome_auth::Auth;
use autonome_dashboard::demo::DemoTradeFeed;
use autonome_gateway::mistral::MistralGateway;
use tracing::info;

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责加载配置、实例化各具体实现并通过 `Arc<dyn Trait>` 注入到 API 层。
///
/// # Logic
/// 1. 加载 `.env` 与分层配置，缺少 API Key 直接退出。
/// 2. 初始化全局日志与 TLS 加密后端。
/// 3. 实例化模型网关、成交数据源与鉴权配置 (任何一步失败都是致命错误)。
/// 4. 启动 HTTP 服务，等待 Ctrl-C 优雅退出。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载配置
    let dotenv_loaded = dotenvy::dotenv().is_ok();
    let config = settings::load()?;

    // 2. 初始化日志
    let _log_guard = logging::init_logging(&config.logging)?;
    autonome_core::tls::install_default_provider();
    info!(dotenv_loaded, "Autonome starting...");

    // 3. 实例化基础设施层
    let gateway = Arc::new(MistralGateway::from_config(&config.model)?);
    let trade_feed = Arc::new(DemoTradeFeed::new()?);
    let auth = Arc::new(Auth::init(config.auth.clone()).await?);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        gateway,
        trade_feed,
        auth,
        config: Arc::new(config),
    };

    // 4. 启动 HTTP 服务
    start_server(state, &bind_addr).await?;
    info!("Autonome stopped");

    Ok(())
}
