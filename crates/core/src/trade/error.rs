use rust_decimal::Decimal;
use thiserror::Error;

use super::entity::TradeSide;

/// # Summary
/// 成交数据域错误。
#[derive(Error, Debug)]
pub enum TradeError {
    /// 数量符号与方向不一致
    #[error("Trade {id}: quantity {quantity} does not match side {side}")]
    QuantitySideMismatch {
        id: String,
        side: TradeSide,
        quantity: Decimal,
    },
    /// 数据源读取失败
    #[error("Trade feed error: {0}")]
    Feed(String),
}
