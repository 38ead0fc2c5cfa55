//! Notifier port for signal events.

use rust_decimal::Decimal;

use crate::domain::{Signal, TokenAddress};

/// Events that can trigger notifications.
#[derive(Debug, Clone)]
pub enum Event {
    /// A token crossed the admission thresholds for the first time.
    SignalDetected(SignalEvent),
    /// A pending signal reached its sell target.
    SignalSucceeded(SignalEvent),
    /// A pending signal aged out without reaching its target.
    SignalExpired(SignalEvent),
}

/// Snapshot of a signal carried by notification events.
#[derive(Debug, Clone)]
pub struct SignalEvent {
    pub name: String,
    pub address: TokenAddress,
    pub buy_price: Decimal,
    pub sell_price: Decimal,
    /// Admission rationale, present only on detection.
    pub reason: Option<String>,
}

impl SignalEvent {
    /// Build an event payload from a signal and an optional rationale.
    #[must_use]
    pub fn from_signal(signal: &Signal, reason: Option<String>) -> Self {
        Self {
            name: signal.name.clone(),
            address: signal.address.clone(),
            buy_price: signal.buy_price,
            sell_price: signal.sell_price,
            reason,
        }
    }
}

/// Trait for notification handlers.
///
/// Notifications are fire-and-forget: `notify` must return quickly, so
/// implementations doing slow I/O hand the event to a background task.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: Event);
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers; itself a [`Notifier`], so
/// the application core stays agnostic of how many sinks are listening.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NotifierRegistry {
    fn notify(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }
}

/// A no-op notifier for tests or when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}

/// A notifier that logs events via tracing. Always registered, so every
/// event leaves a trace even when chat delivery is down.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        use tracing::info;
        match event {
            Event::SignalDetected(e) => {
                info!(
                    token = %e.name,
                    address = %e.address,
                    buy = %e.buy_price,
                    sell = %e.sell_price,
                    "Signal detected"
                );
            }
            Event::SignalSucceeded(e) => {
                info!(token = %e.name, address = %e.address, sell = %e.sell_price, "Signal hit target");
            }
            Event::SignalExpired(e) => {
                info!(token = %e.name, address = %e.address, "Signal expired");
            }
        }
    }
}
