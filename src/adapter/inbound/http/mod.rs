//! Inbound HTTP adapter: webhook receiver and health check.

pub mod server;

pub use server::{router, serve, WebhookState};
