//! Signal entity and its lifecycle states.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::ids::TokenAddress;

/// Lifecycle state of a signal.
///
/// A signal starts `Pending` and transitions monotonically into exactly one
/// of the terminal states; it never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalStatus {
    Pending,
    Success,
    Failure,
}

impl SignalStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }

    /// Parse a stored status string.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "success" => Some(Self::Success),
            "failure" => Some(Self::Failure),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }
}

impl std::fmt::Display for SignalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded buy/sell recommendation for one token, keyed by its address.
///
/// `buy_price` and `sell_price` are fixed at creation; re-detections of the
/// same address never update them.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub name: String,
    pub address: TokenAddress,
    pub buy_price: Decimal,
    pub sell_price: Decimal,
    pub signal_time: DateTime<Utc>,
    pub status: SignalStatus,
}

impl Signal {
    /// Create a pending signal with the sell target computed from the buy
    /// price. The target is computed exactly once, here.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        address: TokenAddress,
        buy_price: Decimal,
        sell_multiplier: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            address,
            buy_price,
            sell_price: buy_price * sell_multiplier,
            signal_time: Utc::now(),
            status: SignalStatus::Pending,
        }
    }

    /// Age of the signal relative to `now`.
    #[must_use]
    pub fn age_at(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.signal_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn sell_price_is_exact_multiple_of_buy_price() {
        let signal = Signal::new(
            "BONK",
            TokenAddress::new("Addr1"),
            dec!(0.00001),
            dec!(1.3),
        );
        assert_eq!(signal.sell_price, dec!(0.000013));
        assert_eq!(signal.sell_price, signal.buy_price * dec!(1.3));
    }

    #[test]
    fn new_signal_starts_pending() {
        let signal = Signal::new("WIF", TokenAddress::new("Addr2"), dec!(1.5), dec!(1.3));
        assert_eq!(signal.status, SignalStatus::Pending);
        assert!(!signal.status.is_terminal());
    }

    #[test]
    fn status_roundtrips_through_strings() {
        for status in [
            SignalStatus::Pending,
            SignalStatus::Success,
            SignalStatus::Failure,
        ] {
            assert_eq!(SignalStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(SignalStatus::parse("unknown"), None);
    }

    #[test]
    fn terminal_states_are_success_and_failure() {
        assert!(SignalStatus::Success.is_terminal());
        assert!(SignalStatus::Failure.is_terminal());
        assert!(!SignalStatus::Pending.is_terminal());
    }

    #[test]
    fn age_is_measured_from_signal_time() {
        let mut signal = Signal::new("X", TokenAddress::new("a"), dec!(1), dec!(1.3));
        signal.signal_time = Utc::now() - chrono::Duration::hours(3);
        let age = signal.age_at(Utc::now());
        assert!(age >= chrono::Duration::hours(3));
        assert!(age < chrono::Duration::hours(4));
    }
}
