use async_trait::async_trait;
use autonome_core::trade::entity::{NewTrade, Trade, TradeSide};
use autonome_core::trade::error::TradeError;
use autonome_core::trade::port::TradeFeed;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::model_info;

/// # Summary
/// 演示用成交数据源，返回一组固定的已完结交易。
///
/// # Invariants
/// - 记录在构造时全部通过 `Trade::new` 校验。
/// - 按成交时间倒序排列。
pub struct DemoTradeFeed {
    trades: Vec<Trade>,
}

fn at(month: u32, day: u32, hour: u32, minute: u32) -> Result<NaiveDateTime, TradeError> {
    NaiveDate::from_ymd_opt(2025, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .ok_or_else(|| TradeError::Feed(format!("invalid demo time {}/{} {}:{}", month, day, hour, minute)))
}

#[allow(clippy::too_many_arguments)]
fn demo_trade(
    id: &str,
    model: &str,
    side: TradeSide,
    symbol: &str,
    price: Decimal,
    quantity: Decimal,
    notional: Decimal,
    pnl: Decimal,
    holding_minutes: u32,
    timestamp: NaiveDateTime,
) -> Result<Trade, TradeError> {
    Trade::new(NewTrade {
        id: id.to_string(),
        model: model.to_string(),
        model_logo: model_info(model).map(|m| m.logo.to_string()),
        side,
        symbol: symbol.to_string(),
        price,
        quantity,
        notional,
        pnl,
        holding_minutes,
        timestamp,
    })
}

impl DemoTradeFeed {
    /// # Summary
    /// 构建演示数据源。
    ///
    /// # Returns
    /// * 演示数据本身不合法时返回 `TradeError`。
    pub fn new() -> Result<Self, TradeError> {
        let trades = vec![
            demo_trade(
                "1",
                "grok_4",
                TradeSide::Short,
                "ETH",
                dec!(3744.7),
                dec!(-2.93),
                dec!(10972),
                dec!(-242.48),
                3 * 60 + 58,
                at(10, 23, 6, 43)?,
            )?,
            demo_trade(
                "2",
                "gpt_5",
                TradeSide::Short,
                "ETH",
                dec!(3781.2),
                dec!(-2.31),
                dec!(8735),
                dec!(-100.65),
                4 * 60 + 41,
                at(10, 23, 6, 41)?,
            )?,
            demo_trade(
                "3",
                "deepseek_chat_v3_1",
                TradeSide::Long,
                "XRP",
                dec!(2.4666),
                dec!(3542.0),
                dec!(8737),
                dec!(-455.66),
                61 * 60 + 38,
                at(10, 23, 3, 9)?,
            )?,
            demo_trade(
                "4",
                "grok_4",
                TradeSide::Long,
                "ETH",
                dec!(3851.2),
                dec!(5.06),
                dec!(19487),
                dec!(-657.41),
                118 * 60 + 33,
                at(10, 23, 2, 41)?,
            )?,
        ];

        Ok(Self { trades })
    }
}

#[async_trait]
impl TradeFeed for DemoTradeFeed {
    async fn all_trades(&self) -> Result<Vec<Trade>, TradeError> {
        tracing::debug!(count = self.trades.len(), "serving demo trades");
        Ok(self.trades.clone())
    }
}
