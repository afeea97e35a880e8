use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::TradeError;

/// # Summary
/// 成交方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    /// 做多
    Long,
    /// 做空
    Short,
}

impl FromStr for TradeSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "long" => Ok(TradeSide::Long),
            "short" => Ok(TradeSide::Short),
            _ => Err(format!("Unknown TradeSide: {}", s)),
        }
    }
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeSide::Long => write!(f, "long"),
            TradeSide::Short => write!(f, "short"),
        }
    }
}

/// # Summary
/// 模型的静态展示信息 (logo、主题色、显示名)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    /// 模型标识，如 `grok_4`
    pub id: &'static str,
    /// Logo 图片地址
    pub logo: &'static str,
    /// 主题色 (`#RRGGBB`)
    pub color: &'static str,
    /// 显示名称
    pub label: &'static str,
}

/// # Summary
/// 构造 `Trade` 所需的原始字段，经 `Trade::new` 校验后才成为合法成交记录。
#[derive(Debug, Clone)]
pub struct NewTrade {
    pub id: String,
    pub model: String,
    pub model_logo: Option<String>,
    pub side: TradeSide,
    pub symbol: String,
    pub price: Decimal,
    pub quantity: Decimal,
    pub notional: Decimal,
    pub pnl: Decimal,
    pub holding_minutes: u32,
    pub timestamp: NaiveDateTime,
}

/// # Summary
/// 一笔已完结的模型交易记录。
///
/// # Invariants
/// - `quantity` 的符号与 `side` 一致：做空为负，做多为正。
/// - 创建后不可变，筛选只是只读投影。
/// - 只能经 `Trade::new` 构造，因此不提供反序列化。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trade {
    /// 全局唯一 ID
    pub id: String,
    /// 下单模型标识
    pub model: String,
    /// 模型 logo (缺省时使用模型表中的默认值)
    pub model_logo: Option<String>,
    /// 方向
    pub side: TradeSide,
    /// 交易标的，如 ETH
    pub symbol: String,
    /// 成交价
    pub price: Decimal,
    /// 带符号的数量
    pub quantity: Decimal,
    /// 名义价值
    pub notional: Decimal,
    /// 已实现盈亏
    pub pnl: Decimal,
    /// 持仓时长 (分钟)
    pub holding_minutes: u32,
    /// 平仓时间 (本地时间)
    pub timestamp: NaiveDateTime,
}

impl Trade {
    /// # Summary
    /// 校验并创建成交记录。
    ///
    /// # Returns
    /// * 数量符号与方向不一致 (或数量为零) 时返回 `TradeError::QuantitySideMismatch`。
    pub fn new(raw: NewTrade) -> Result<Self, TradeError> {
        let consistent = match raw.side {
            TradeSide::Long => raw.quantity > Decimal::ZERO,
            TradeSide::Short => raw.quantity < Decimal::ZERO,
        };
        if !consistent {
            return Err(TradeError::QuantitySideMismatch {
                id: raw.id,
                side: raw.side,
                quantity: raw.quantity,
            });
        }

        Ok(Self {
            id: raw.id,
            model: raw.model,
            model_logo: raw.model_logo,
            side: raw.side,
            symbol: raw.symbol,
            price: raw.price,
            quantity: raw.quantity,
            notional: raw.notional,
            pnl: raw.pnl,
            holding_minutes: raw.holding_minutes,
            timestamp: raw.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn raw(side: TradeSide, quantity: Decimal) -> NewTrade {
        NewTrade {
            id: "1".into(),
            model: "grok_4".into(),
            model_logo: None,
            side,
            symbol: "ETH".into(),
            price: dec!(3744.7),
            quantity,
            notional: dec!(10972),
            pnl: dec!(-242.48),
            holding_minutes: 238,
            timestamp: NaiveDate::from_ymd_opt(2025, 10, 23)
                .and_then(|d| d.and_hms_opt(6, 43, 0))
                .unwrap(),
        }
    }

    #[test]
    fn test_quantity_sign_follows_side() {
        assert!(Trade::new(raw(TradeSide::Short, dec!(-2.93))).is_ok());
        assert!(Trade::new(raw(TradeSide::Long, dec!(5.06))).is_ok());
    }

    #[test]
    fn test_mismatched_sign_is_rejected() {
        let err = Trade::new(raw(TradeSide::Short, dec!(2.93))).unwrap_err();
        assert!(matches!(err, TradeError::QuantitySideMismatch { .. }));
        assert!(Trade::new(raw(TradeSide::Long, Decimal::ZERO)).is_err());
    }

    #[test]
    fn test_side_parse() {
        assert_eq!("SHORT".parse::<TradeSide>().unwrap(), TradeSide::Short);
        assert!("flat".parse::<TradeSide>().is_err());
    }
}
