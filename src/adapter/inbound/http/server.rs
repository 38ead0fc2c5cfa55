//! Webhook and health routes.
//!
//! Two endpoints: `POST /webhook` receives bot updates as an opaque body and
//! always answers `200 "OK"` no matter how processing goes, and `GET /` is a
//! liveness probe. There is no authentication on either route beyond what
//! the update payload itself carries.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;
use teloxide::prelude::*;
use teloxide::types::Update;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::adapter::inbound::telegram::{reply, Dispatcher};
use crate::error::Result;
use crate::port::outbound::{PriceFeed, SignalStore};

/// Shared state for the webhook routes.
pub struct WebhookState<F, S> {
    pub bot: Bot,
    pub dispatcher: Dispatcher<F, S>,
}

/// Build the application router.
pub fn router<F, S>(state: Arc<WebhookState<F, S>>) -> Router
where
    F: PriceFeed + 'static,
    S: SignalStore + 'static,
{
    Router::new()
        .route("/", get(health))
        .route("/webhook", post(receive_update::<F, S>))
        .with_state(state)
}

/// Bind the listener and serve until the process exits.
pub async fn serve<F, S>(state: Arc<WebhookState<F, S>>, bind_addr: &str) -> Result<()>
where
    F: PriceFeed + 'static,
    S: SignalStore + 'static,
{
    let listener = TcpListener::bind(bind_addr).await?;
    info!(addr = bind_addr, "Webhook server listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn health() -> &'static str {
    "Bot is running!"
}

/// Decode the update and hand it to the dispatcher.
///
/// Malformed payloads are logged and dropped; the response is `OK` either
/// way so Telegram never retries a poison update.
async fn receive_update<F, S>(
    State(state): State<Arc<WebhookState<F, S>>>,
    body: String,
) -> &'static str
where
    F: PriceFeed + 'static,
    S: SignalStore + 'static,
{
    match serde_json::from_str::<Update>(&body) {
        Ok(update) => {
            let actions = state.dispatcher.handle_update(update).await;
            reply::deliver(&state.bot, actions).await;
        }
        Err(e) => {
            warn!(error = %e, "Ignoring malformed webhook payload");
        }
    }

    "OK"
}
