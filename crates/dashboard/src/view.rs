use autonome_core::trade::entity::{Trade, TradeSide};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::format::{
    NOTIONAL_APPROX_FACTOR, PRICE_APPROX_FACTOR, format_holding_time, format_notional,
    format_pnl, format_price, format_quantity, format_timestamp,
};
use crate::models::{model_info, model_label};

/// 成交列表最多展示的条数
pub const MAX_VISIBLE_TRADES: usize = 400;

/// # Summary
/// 模型筛选条件，`all` 或单个模型标识。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModelFilter {
    #[default]
    All,
    Model(String),
}

impl ModelFilter {
    /// 判断成交记录是否命中筛选
    pub fn matches(&self, trade: &Trade) -> bool {
        match self {
            ModelFilter::All => true,
            ModelFilter::Model(id) => trade.model == *id,
        }
    }

    /// 下拉框中的显示文字
    pub fn label(&self) -> String {
        match self {
            ModelFilter::All => "All Models".to_string(),
            ModelFilter::Model(id) => model_label(id).to_string(),
        }
    }
}

impl FromStr for ModelFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("model filter must not be empty".to_string());
        }
        if s.eq_ignore_ascii_case("all") {
            Ok(ModelFilter::All)
        } else {
            Ok(ModelFilter::Model(s.to_string()))
        }
    }
}

impl fmt::Display for ModelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelFilter::All => write!(f, "all"),
            ModelFilter::Model(id) => write!(f, "{}", id),
        }
    }
}

/// # Summary
/// 面板标签页，三者互斥。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Trades,
    ModelChat,
    Positions,
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trades" => Ok(Tab::Trades),
            "modelchat" => Ok(Tab::ModelChat),
            "positions" => Ok(Tab::Positions),
            _ => Err(format!("Unknown Tab: {}", s)),
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Trades => write!(f, "trades"),
            Tab::ModelChat => write!(f, "modelchat"),
            Tab::Positions => write!(f, "positions"),
        }
    }
}

/// 盈亏着色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Favorable,
    Unfavorable,
}

impl Tone {
    /// 正盈亏为有利，零与负数为不利
    pub fn of(pnl: Decimal) -> Self {
        if pnl > Decimal::ZERO {
            Tone::Favorable
        } else {
            Tone::Unfavorable
        }
    }
}

/// # Summary
/// 单笔成交的展示卡片，所有数值均已格式化。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeCard {
    pub id: String,
    pub model: String,
    pub model_label: String,
    pub model_color: Option<String>,
    pub model_logo: Option<String>,
    pub side: String,
    pub symbol: String,
    pub price: String,
    pub price_approx: String,
    pub quantity: String,
    pub notional: String,
    pub notional_approx: String,
    pub pnl: String,
    pub pnl_tone: Tone,
    pub holding_time: String,
    pub timestamp: String,
}

impl TradeCard {
    /// # Summary
    /// 将成交记录渲染为展示卡片。
    ///
    /// # Logic
    /// 1. 从模型表取显示名与主题色，未知模型回退为原始标识且无主题色。
    /// 2. 记录自带 logo 优先，否则使用模型表中的 logo。
    /// 3. 近似值仅用于展示：价格 × 0.98，名义价值 × 1.02。
    pub fn from_trade(trade: &Trade) -> Self {
        let info = model_info(&trade.model);
        let side = match trade.side {
            TradeSide::Long => "LONG",
            TradeSide::Short => "SHORT",
        };

        Self {
            id: trade.id.clone(),
            model: trade.model.clone(),
            model_label: model_label(&trade.model).to_string(),
            model_color: info.map(|m| m.color.to_string()),
            model_logo: trade
                .model_logo
                .clone()
                .or_else(|| info.map(|m| m.logo.to_string())),
            side: side.to_string(),
            symbol: trade.symbol.clone(),
            price: format_price(trade.price),
            price_approx: format!("≈{}", format_price(trade.price * PRICE_APPROX_FACTOR)),
            quantity: format_quantity(trade.quantity),
            notional: format_notional(trade.notional),
            notional_approx: format!(
                "≈{}",
                format_notional(trade.notional * NOTIONAL_APPROX_FACTOR)
            ),
            pnl: format_pnl(trade.pnl),
            pnl_tone: Tone::of(trade.pnl),
            holding_time: format_holding_time(trade.holding_minutes),
            timestamp: format_timestamp(&trade.timestamp),
        }
    }
}

/// # Summary
/// 当前标签页渲染出的面板内容。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TradesPanel {
    /// 成交列表
    Trades {
        filter_label: String,
        caption: String,
        cards: Vec<TradeCard>,
    },
    /// 尚未实现内容的标签页
    Placeholder { title: String, caption: String },
}

/// # Summary
/// 成交面板的视图状态。
///
/// # Invariants
/// - 成交记录按数据源给出的顺序保存，筛选不改变相对顺序。
/// - 同一时刻只有一个筛选条件和一个激活的标签页。
#[derive(Debug, Clone)]
pub struct TradesView {
    trades: Vec<Trade>,
    filter: ModelFilter,
    tab: Tab,
    expanded: bool,
}

impl TradesView {
    pub fn new(trades: Vec<Trade>) -> Self {
        Self {
            trades,
            filter: ModelFilter::All,
            tab: Tab::Trades,
            expanded: false,
        }
    }

    /// # Summary
    /// 按模型筛选成交记录。
    ///
    /// # Returns
    /// * 保持原有顺序的子序列；`All` 返回全部记录。
    pub fn filter(&self, filter: &ModelFilter) -> Vec<&Trade> {
        self.trades.iter().filter(|t| filter.matches(t)).collect()
    }

    pub fn set_filter(&mut self, filter: ModelFilter) {
        self.filter = filter;
    }

    pub fn current_filter(&self) -> &ModelFilter {
        &self.filter
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn active_tab(&self) -> Tab {
        self.tab
    }

    /// 切换侧栏展开状态 (初始收起)，返回切换后的值
    pub fn toggle_expanded(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// 当前筛选下可见的成交，最多 `MAX_VISIBLE_TRADES` 条
    pub fn visible_trades(&self) -> Vec<&Trade> {
        self.trades
            .iter()
            .filter(|t| self.filter.matches(t))
            .take(MAX_VISIBLE_TRADES)
            .collect()
    }

    /// # Summary
    /// 渲染当前标签页。
    ///
    /// # Logic
    /// 1. `trades` 标签页：对可见成交逐条生成卡片。
    /// 2. 其他标签页：返回固定的占位标题与说明。
    pub fn render(&self) -> TradesPanel {
        match self.tab {
            Tab::Trades => TradesPanel::Trades {
                filter_label: self.filter.label(),
                caption: format!("Showing Last {} Trades", MAX_VISIBLE_TRADES),
                cards: self
                    .visible_trades()
                    .into_iter()
                    .map(TradeCard::from_trade)
                    .collect(),
            },
            Tab::ModelChat => TradesPanel::Placeholder {
                title: "ModelChat".to_string(),
                caption: "Chat with AI models about their trading decisions".to_string(),
            },
            Tab::Positions => TradesPanel::Placeholder {
                title: "Positions".to_string(),
                caption: "View current open positions".to_string(),
            },
        }
    }
}
