//! Screening policy: which snapshots qualify as signals.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::signal::Signal;
use super::snapshot::TokenSnapshot;

/// Admission thresholds and the sell-target multiplier.
///
/// Both thresholds are strict: a snapshot sitting exactly on a threshold does
/// not qualify.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenConfig {
    pub min_liquidity: Decimal,
    pub min_volume: Decimal,
    pub sell_multiplier: Decimal,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            min_liquidity: dec!(5000),
            min_volume: dec!(1000),
            sell_multiplier: dec!(1.3),
        }
    }
}

impl ScreenConfig {
    /// Whether a snapshot crosses both admission thresholds.
    #[must_use]
    pub fn qualifies(&self, snapshot: &TokenSnapshot) -> bool {
        snapshot.liquidity > self.min_liquidity && snapshot.volume > self.min_volume
    }

    /// Build a pending signal from a qualifying snapshot.
    #[must_use]
    pub fn admit(&self, snapshot: &TokenSnapshot) -> Signal {
        Signal::new(
            snapshot.name.clone(),
            snapshot.address.clone(),
            snapshot.price,
            self.sell_multiplier,
        )
    }
}

/// Human-readable admission rationale attached to notifications.
#[must_use]
pub fn admission_reason(snapshot: &TokenSnapshot) -> String {
    format!(
        "Liquidity: {}, Volume: {}",
        snapshot.liquidity, snapshot.volume
    )
}
