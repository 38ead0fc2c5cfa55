//! Composition root: wire adapters together and run the process.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::{info, warn};
use url::Url;

use crate::adapter::inbound::http::{serve, WebhookState};
use crate::adapter::inbound::telegram::{reply, AllowList, Dispatcher};
use crate::adapter::outbound::dexscreener::{DexScreenerFeed, FeedConfig};
use crate::adapter::outbound::notifier::telegram::{TelegramConfig, TelegramNotifier};
use crate::adapter::outbound::sqlite::{create_pool, run_migrations, SqliteSignalStore};
use crate::app::config::Config;
use crate::app::generator::SignalGenerator;
use crate::app::scanner::Scanner;
use crate::app::updater::StatusUpdater;
use crate::error::Result;
use crate::port::outbound::{LogNotifier, Notifier, NotifierRegistry, NullNotifier};

/// Main application orchestrator.
pub struct App;

impl App {
    /// Wire everything up and serve until the process exits.
    pub async fn run(config: Config) -> Result<()> {
        info!(
            feed = %config.feed.url,
            interval_secs = config.screener.interval_secs,
            "Starting sigscout"
        );

        let pool = create_pool(&config.database.url)?;
        run_migrations(&pool)?;
        let store = Arc::new(SqliteSignalStore::new(pool));

        let feed = Arc::new(DexScreenerFeed::new(&FeedConfig {
            url: config.feed.url.clone(),
            timeout_secs: config.feed.timeout_secs,
        })?);

        let bot = Bot::new(&config.telegram.bot_token);

        let mut registry = NotifierRegistry::new();
        registry.register(Box::new(LogNotifier));
        registry.register(Box::new(TelegramNotifier::new(
            bot.clone(),
            TelegramConfig {
                chat_id: config.telegram.chat_id,
                notify_signals: config.telegram.notify_signals,
                notify_transitions: config.telegram.notify_transitions,
            },
        )));
        let notifier: Arc<dyn Notifier> = Arc::new(registry);

        let screen = config.screener.screen();

        // Background loop: generate, refresh, sleep.
        let scanner = Arc::new(Scanner::new(
            SignalGenerator::new(
                feed.clone(),
                store.clone(),
                notifier.clone(),
                screen.clone(),
            ),
            StatusUpdater::new(
                feed.clone(),
                store.clone(),
                notifier,
                config.screener.max_pending_age(),
            ),
            config.screener.interval(),
        ));
        let scanner_handle = scanner.spawn();

        register_webhook(&bot, &config.webhook.public_host).await;
        if let Err(e) = reply::register_bot_commands(&bot).await {
            warn!(error = %e, "Failed to register bot commands with Telegram");
        }

        // Command-triggered scans reply in the chat instead of pushing, so
        // the dispatcher's generator carries a null notifier.
        let dispatcher = Dispatcher::new(
            SignalGenerator::new(feed, store.clone(), Arc::new(NullNotifier), screen),
            store,
            AllowList::new(config.telegram.allowed_user_ids.iter().copied()),
        );

        let state = Arc::new(WebhookState { bot, dispatcher });
        let result = serve(state, &config.webhook.bind_addr).await;

        scanner_handle.stop().await;
        result
    }
}

/// Point Telegram's webhook at our public host.
///
/// Registration failure is logged but not fatal; updates simply stop
/// arriving until the endpoint is reachable and re-registered.
async fn register_webhook(bot: &Bot, public_host: &str) {
    let callback = format!("https://{public_host}/webhook");

    match Url::parse(&callback) {
        Ok(url) => {
            if let Err(e) = bot.set_webhook(url).await {
                warn!(error = %e, callback, "Failed to register webhook");
            } else {
                info!(callback, "Webhook registered");
            }
        }
        Err(e) => {
            warn!(error = %e, callback, "Invalid webhook callback URL");
        }
    }
}
