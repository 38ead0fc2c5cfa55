//! Builders for domain primitives.

use rust_decimal::Decimal;

use crate::domain::{TokenAddress, TokenSnapshot};

/// Build a snapshot with the common fields spelled out and age zeroed.
#[must_use]
pub fn snapshot(
    name: &str,
    address: &str,
    price: Decimal,
    volume: Decimal,
    liquidity: Decimal,
) -> TokenSnapshot {
    TokenSnapshot {
        name: name.to_string(),
        address: TokenAddress::new(address),
        price,
        volume,
        liquidity,
        age: Decimal::ZERO,
    }
}
