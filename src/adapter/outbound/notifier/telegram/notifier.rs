//! Telegram push notifications.
//!
//! Provides the [`TelegramNotifier`] for delivering signal events to the
//! authorized chat. Events are queued onto a channel and sent by a background
//! worker that owns the bot handle, so `notify` never blocks a scan cycle.

use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::port::outbound::notifier::{Event, Notifier};

use super::format::format_event_message;

/// Configuration for the Telegram notifier.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Target chat ID for push notifications.
    pub chat_id: i64,
    /// Send notifications for newly detected signals.
    pub notify_signals: bool,
    /// Send notifications for success/failure transitions.
    pub notify_transitions: bool,
}

/// Telegram notifier that sends messages to the authorized chat.
pub struct TelegramNotifier {
    sender: mpsc::UnboundedSender<Event>,
}

impl TelegramNotifier {
    /// Create a new Telegram notifier and spawn the delivery worker.
    #[must_use]
    pub fn new(bot: Bot, config: TelegramConfig) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(telegram_worker(bot, config, receiver));
        Self { sender }
    }
}

impl Notifier for TelegramNotifier {
    fn notify(&self, event: Event) {
        if self.sender.send(event).is_err() {
            warn!("Telegram notifier channel closed");
        }
    }
}

/// Background worker that sends Telegram messages.
///
/// Delivery failures are logged and never retried; the next event is
/// attempted regardless.
async fn telegram_worker(
    bot: Bot,
    config: TelegramConfig,
    mut receiver: mpsc::UnboundedReceiver<Event>,
) {
    let chat_id = ChatId(config.chat_id);

    info!(chat_id = config.chat_id, "Telegram notifier started");

    while let Some(event) = receiver.recv().await {
        let Some((text, keyboard)) = format_event_message(&event, &config) else {
            continue;
        };

        let mut request = bot
            .send_message(chat_id, &text)
            .parse_mode(ParseMode::MarkdownV2);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(keyboard);
        }

        if let Err(e) = request.await {
            error!(error = %e, "Failed to send Telegram message");
        }
    }

    warn!("Telegram notifier worker shutting down");
}
