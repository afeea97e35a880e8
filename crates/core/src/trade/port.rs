use async_trait::async_trait;

use super::entity::Trade;
use super::error::TradeError;

/// # Summary
/// 成交记录数据源接口。当前由演示数据实现，后续可替换为实时交易后端。
///
/// # Invariants
/// - 返回的记录均已通过 `Trade::new` 校验。
/// - 按时间倒序排列 (最新在前)。
#[async_trait]
pub trait TradeFeed: Send + Sync {
    /// # Summary
    /// 获取全部成交记录。展示条数上限由视图在筛选之后施加。
    ///
    /// # Returns
    /// * 有序成交列表，或 `TradeError::Feed`。
    async fn all_trades(&self) -> Result<Vec<Trade>, TradeError>;
}
