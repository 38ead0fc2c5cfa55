//! Outbound adapters: implementations of the outbound ports.

pub mod dexscreener;
pub mod notifier;
pub mod sqlite;
