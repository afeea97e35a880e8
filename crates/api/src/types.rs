//! # DTO (Data Transfer Object) 层
//!
//! 将内部领域模型转化为面向前端 JSON 输出的轻量结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use autonome_core::chat::entity::UiMessage;
use autonome_core::trade::entity::ModelInfo;
use autonome_dashboard::view::{Tone, TradeCard, TradesPanel};

// ============================================================
//  对话与通知 DTO
// ============================================================

/// `/api/chat` 请求体
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// 完整的对话历史 (UI 消息格式)
    pub messages: Vec<UiMessage>,
}

/// `/api/completion` 请求体
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompletionRequest {
    /// 生成通知的主题描述
    #[schema(example = "Messages during finals week.")]
    pub prompt: String,
}

// ============================================================
//  成交面板 DTO
// ============================================================

/// 成交面板查询参数
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TradesQuery {
    /// 模型标识或 `all`
    pub model: Option<String>,
    /// `trades` / `modelchat` / `positions`
    pub tab: Option<String>,
}

/// 单笔成交卡片 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TradeCardResponse {
    #[schema(example = "1")]
    pub id: String,
    #[schema(example = "grok_4")]
    pub model: String,
    /// 显示名，未知模型为原始标识
    #[schema(example = "Grok 4")]
    pub model_label: String,
    #[schema(example = "#000000")]
    pub model_color: Option<String>,
    pub model_logo: Option<String>,
    /// `LONG` / `SHORT`
    #[schema(example = "SHORT")]
    pub side: String,
    #[schema(example = "ETH")]
    pub symbol: String,
    #[schema(example = "$3,744.70")]
    pub price: String,
    #[schema(example = "≈$3,669.81")]
    pub price_approx: String,
    #[schema(example = "-2.93")]
    pub quantity: String,
    #[schema(example = "$10,972")]
    pub notional: String,
    #[schema(example = "≈$11,191")]
    pub notional_approx: String,
    #[schema(example = "-$242.48")]
    pub pnl: String,
    /// `favorable` / `unfavorable`
    #[schema(example = "unfavorable")]
    pub pnl_tone: String,
    #[schema(example = "3H 58M")]
    pub holding_time: String,
    #[schema(example = "10/23, 6:43 AM")]
    pub timestamp: String,
}

/// 成交面板 DTO
///
/// `kind` 为 `trades` 时携带筛选文字与卡片，为 `placeholder` 时携带标题。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TradesPanelResponse {
    #[schema(example = "trades")]
    pub kind: String,
    /// 当前激活的标签页
    #[schema(example = "trades")]
    pub tab: String,
    #[schema(example = "All Models")]
    pub filter_label: Option<String>,
    pub title: Option<String>,
    #[schema(example = "Showing Last 400 Trades")]
    pub caption: String,
    pub cards: Vec<TradeCardResponse>,
}

/// 模型展示信息 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModelInfoResponse {
    #[schema(example = "gpt_5")]
    pub id: String,
    pub logo: String,
    #[schema(example = "#39B295")]
    pub color: String,
    #[schema(example = "GPT 5")]
    pub label: String,
}

/// 鉴权探针响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthOkResponse {
    #[schema(example = true)]
    pub ok: bool,
}

// ============================================================
//  通用响应 DTO
// ============================================================

/// 统一 API 响应包装器
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T: Serialize + ToSchema> {
    /// 是否成功
    pub success: bool,
    /// 数据载荷 (成功时)
    pub data: Option<T>,
    /// 错误信息 (失败时)
    pub error: Option<String>,
}

impl<T: Serialize + ToSchema> ApiResponse<T> {
    /// 构建成功响应
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// 构建失败响应 (不含泛型载荷)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误描述信息
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}

// ============================================================
//  领域模型 → DTO 惯用转换 (impl From<T>)
// ============================================================

impl From<TradeCard> for TradeCardResponse {
    fn from(c: TradeCard) -> Self {
        let pnl_tone = match c.pnl_tone {
            Tone::Favorable => "favorable",
            Tone::Unfavorable => "unfavorable",
        };
        Self {
            id: c.id,
            model: c.model,
            model_label: c.model_label,
            model_color: c.model_color,
            model_logo: c.model_logo,
            side: c.side,
            symbol: c.symbol,
            price: c.price,
            price_approx: c.price_approx,
            quantity: c.quantity,
            notional: c.notional,
            notional_approx: c.notional_approx,
            pnl: c.pnl,
            pnl_tone: pnl_tone.to_string(),
            holding_time: c.holding_time,
            timestamp: c.timestamp,
        }
    }
}

impl TradesPanelResponse {
    /// 由渲染结果与当前标签页构建
    pub fn new(panel: TradesPanel, tab: String) -> Self {
        match panel {
            TradesPanel::Trades {
                filter_label,
                caption,
                cards,
            } => Self {
                kind: "trades".to_string(),
                tab,
                filter_label: Some(filter_label),
                title: None,
                caption,
                cards: cards.into_iter().map(Into::into).collect(),
            },
            TradesPanel::Placeholder { title, caption } => Self {
                kind: "placeholder".to_string(),
                tab,
                filter_label: None,
                title: Some(title),
                caption,
                cards: Vec::new(),
            },
        }
    }
}

impl From<&ModelInfo> for ModelInfoResponse {
    fn from(m: &ModelInfo) -> Self {
        Self {
            id: m.id.to_string(),
            logo: m.logo.to_string(),
            color: m.color.to_string(),
            label: m.label.to_string(),
        }
    }
}
