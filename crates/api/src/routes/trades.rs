//! # 成交面板路由

use axum::Json;
use axum::extract::{Query, State};

use autonome_dashboard::models::MODEL_INFO;
use autonome_dashboard::view::{ModelFilter, Tab, TradesView};

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiErrorResponse, ApiResponse, ModelInfoResponse, TradesPanelResponse, TradesQuery};

/// 获取成交面板
///
/// 按模型筛选最近的成交记录，并渲染指定标签页的内容。
/// `model` 缺省为 `all`，`tab` 缺省为 `trades`。
#[utoipa::path(
    get,
    path = "/api/trades",
    tag = "成交 (Trades)",
    params(TradesQuery),
    responses(
        (status = 200, description = "渲染后的面板", body = ApiResponse<TradesPanelResponse>),
        (status = 400, description = "筛选条件或标签页非法", body = ApiErrorResponse)
    )
)]
pub async fn get_trades(
    State(state): State<AppState>,
    Query(query): Query<TradesQuery>,
) -> Result<Json<ApiResponse<TradesPanelResponse>>, ApiError> {
    let filter: ModelFilter = query
        .model
        .as_deref()
        .unwrap_or("all")
        .parse()
        .map_err(ApiError::BadRequest)?;
    let tab: Tab = match query.tab.as_deref() {
        Some(t) => t.parse().map_err(ApiError::BadRequest)?,
        None => Tab::default(),
    };

    // 先筛选后截断，上限由视图施加
    let trades = state.trade_feed.all_trades().await?;
    let mut view = TradesView::new(trades);
    view.set_filter(filter);
    view.select_tab(tab);

    Ok(Json(ApiResponse::ok(TradesPanelResponse::new(
        view.render(),
        view.active_tab().to_string(),
    ))))
}

/// 获取参赛模型列表
#[utoipa::path(
    get,
    path = "/api/models",
    tag = "成交 (Trades)",
    responses(
        (status = 200, description = "模型展示信息", body = ApiResponse<Vec<ModelInfoResponse>>)
    )
)]
pub async fn list_models() -> Json<ApiResponse<Vec<ModelInfoResponse>>> {
    Json(ApiResponse::ok(MODEL_INFO.iter().map(Into::into).collect()))
}
