//! Feed-agnostic domain types and screening policy.

mod ids;
mod screen;
mod signal;
mod snapshot;

pub use ids::TokenAddress;
pub use screen::{admission_reason, ScreenConfig};
pub use signal::{Signal, SignalStatus};
pub use snapshot::TokenSnapshot;
