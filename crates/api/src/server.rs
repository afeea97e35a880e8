//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI、配置 CORS 并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 组装依赖后调用。

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use autonome_auth::Auth;
use autonome_core::config::AppConfig;
use autonome_core::gateway::port::ModelGateway;
use autonome_core::trade::port::TradeFeed;

use crate::error::ApiError;
use crate::routes::{auth, chat, completion, trades};

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - 所有字段在服务启动前构建完毕，之后只读共享，生命周期与进程等同。
#[derive(Clone)]
pub struct AppState {
    /// 模型网关
    pub gateway: Arc<dyn ModelGateway>,
    /// 成交数据源
    pub trade_feed: Arc<dyn TradeFeed>,
    /// 已初始化的鉴权配置
    pub auth: Arc<Auth>,
    /// 应用配置
    pub config: Arc<AppConfig>,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Autonome",
        version = "0.1.0",
        description = "Autonomous AI Trading Platform。提供模型对话、结构化通知、成交面板与鉴权探针。",
        license(name = "MIT")
    ),
    tags(
        (name = "对话 (Chat)", description = "与模型流式对话 (UI message stream)"),
        (name = "通知 (Completion)", description = "结构化通知生成"),
        (name = "成交 (Trades)", description = "模型成交记录与展示信息"),
        (name = "鉴权 (Auth)", description = "鉴权服务探针")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// # Summary
/// 根据受信任来源构建 CORS 策略。
///
/// # Logic
/// 1. 忽略空白来源，未设置 `CORS_ORIGIN` 时不放行任何跨域请求。
/// 2. 允许携带凭据，因此方法与请求头必须显式列出。
///
/// # Returns
/// * 来源无法作为响应头值时返回 `ApiError::Internal`。
pub fn cors_layer(auth: &Auth) -> Result<CorsLayer, ApiError> {
    let origins = auth
        .config()
        .effective_origins()
        .map(|o| {
            HeaderValue::from_str(o)
                .map_err(|e| ApiError::Internal(format!("invalid trusted origin {:?}: {}", o, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

/// # Summary
/// 构建完整的 axum 应用路由树 (含 Swagger UI 与 CORS)。
///
/// # Arguments
/// * `state` - 由外部组装好的共享状态
///
/// # Returns
/// * 可直接交给 `axum::serve` 的 `Router`；受信任来源非法时返回错误。
pub fn build_router(state: AppState) -> Result<Router, ApiError> {
    let cors = cors_layer(&state.auth)?;

    let api_router = OpenApiRouter::new()
        .routes(routes!(chat::chat))
        .routes(routes!(completion::completion))
        .routes(routes!(trades::get_trades))
        .routes(routes!(trades::list_models))
        .routes(routes!(auth::auth_ok));

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(api_router)
        .with_state(state)
        .split_for_parts();

    Ok(router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(cors))
}

/// 等待 Ctrl-C 信号以触发优雅退出
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("shutdown signal received");
}

/// # Summary
/// 构建路由并启动 HTTP 监听，直到收到 Ctrl-C。
///
/// # Arguments
/// * `state` - 由外部组装好的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:3000"`
pub async fn start_server(state: AppState, bind_addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state)?;

    tracing::info!("Autonome API server listening on {}", bind_addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
