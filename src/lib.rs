//! Sigscout - token signal scanning and Telegram notification.
//!
//! This crate polls the DexScreener price feed for token pairs, flags the
//! ones that cross fixed liquidity/volume thresholds as signals, persists
//! them to SQLite and notifies an authorized Telegram chat. Inbound bot
//! updates arrive over a webhook served next to a liveness route.
//!
//! # Architecture
//!
//! - [`domain`] - Feed-agnostic types: signals, snapshots, screening policy
//! - [`port`] - Trait seams: price feed, signal store, notifier
//! - [`adapter`] - Implementations: DexScreener client, SQLite store,
//!   Telegram notifier and dispatcher, axum webhook server
//! - [`app`] - Configuration, the scan loop and the composition root
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use sigscout::app::{App, Config};
//!
//! # async fn run() -> sigscout::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! App::run(config).await
//! # }
//! ```

pub mod adapter;
pub mod app;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
