//! Outbound notifier adapters.

pub mod telegram;
