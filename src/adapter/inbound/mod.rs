//! Inbound adapters: HTTP webhook server and Telegram dispatch.

pub mod http;
pub mod telegram;
