//! Point-in-time market readings from the price feed.

use rust_decimal::Decimal;

use super::ids::TokenAddress;

/// One market reading for a token, as returned by the external feed.
///
/// Snapshots are rebuilt fresh on every feed call and never persisted; they
/// have no identity beyond the call that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSnapshot {
    pub name: String,
    pub address: TokenAddress,
    /// Latest trade price in USD.
    pub price: Decimal,
    /// 24h traded volume in USD.
    pub volume: Decimal,
    /// Pooled liquidity in USD.
    pub liquidity: Decimal,
    /// Pair age in hours, zero when the feed omits it.
    pub age: Decimal,
}
