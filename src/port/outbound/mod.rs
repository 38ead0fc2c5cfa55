//! Outbound ports: traits the application core depends on.

pub mod feed;
pub mod notifier;
pub mod store;

pub use feed::PriceFeed;
pub use notifier::{Event, LogNotifier, Notifier, NotifierRegistry, NullNotifier, SignalEvent};
pub use store::SignalStore;
