//! Update dispatch: parse → authorize → execute.
//!
//! The dispatcher is a pure decision layer. It turns one inbound update into
//! a list of outbound actions and performs no Telegram I/O itself; delivery
//! happens at the webhook edge, so every path here is testable without a
//! network.

use std::sync::Arc;

use teloxide::types::{ChatId, InlineKeyboardMarkup, Update, UpdateKind};
use tracing::{debug, warn};

use crate::adapter::outbound::notifier::telegram::format::{
    escape_markdown, format_signal_message, signal_keyboard, COPY_CALLBACK_PREFIX,
};
use crate::app::generator::SignalGenerator;
use crate::domain::SignalStatus;
use crate::port::outbound::{PriceFeed, SignalEvent, SignalStore};

use super::auth::{AllowList, REJECTION_MESSAGE};
use super::command::{command_help, parse_command, BotCommand, CommandParseError};

/// One outbound action produced by dispatching an update.
#[derive(Debug, Clone)]
pub enum Outbound {
    Message {
        chat_id: ChatId,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
        /// Whether the text is MarkdownV2-escaped.
        markdown: bool,
    },
    CallbackAck {
        callback_id: String,
    },
}

impl Outbound {
    fn plain(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self::Message {
            chat_id,
            text: text.into(),
            keyboard: None,
            markdown: false,
        }
    }

    fn signal_card(chat_id: ChatId, event: &SignalEvent) -> Self {
        Self::Message {
            chat_id,
            text: format_signal_message("📡 Signal", event),
            keyboard: Some(signal_keyboard(event.address.as_str())),
            markdown: true,
        }
    }
}

/// Stateless command dispatcher for webhook-delivered updates.
pub struct Dispatcher<F, S> {
    generator: SignalGenerator<F, S>,
    store: Arc<S>,
    allow_list: AllowList,
}

impl<F: PriceFeed, S: SignalStore> Dispatcher<F, S> {
    pub fn new(generator: SignalGenerator<F, S>, store: Arc<S>, allow_list: AllowList) -> Self {
        Self {
            generator,
            store,
            allow_list,
        }
    }

    /// Dispatch one update into its outbound actions.
    pub async fn handle_update(&self, update: Update) -> Vec<Outbound> {
        match update.kind {
            UpdateKind::Message(message) => {
                let Some(text) = message.text() else {
                    return Vec::new();
                };
                self.handle_text(message.chat.id, text).await
            }
            UpdateKind::CallbackQuery(callback) => {
                let chat_id = callback
                    .message
                    .as_ref()
                    .map(|m| m.chat().id)
                    .unwrap_or(ChatId(callback.from.id.0 as i64));
                self.handle_callback(chat_id, callback.id, callback.data)
            }
            _ => {
                debug!("Ignoring unsupported update kind");
                Vec::new()
            }
        }
    }

    async fn handle_text(&self, chat_id: ChatId, text: &str) -> Vec<Outbound> {
        // Authorization comes first: unauthorized senders get the fixed
        // rejection and no command runs at all.
        if !self.allow_list.is_allowed(chat_id.0) {
            if text.trim_start().starts_with('/') {
                return vec![Outbound::plain(chat_id, REJECTION_MESSAGE)];
            }
            return Vec::new();
        }

        match parse_command(text) {
            Ok(command) => self.execute(chat_id, command).await,
            Err(CommandParseError::NotACommand) => Vec::new(),
            Err(err) => vec![Outbound::plain(
                chat_id,
                format!("Invalid command: {err}\n\n{}", command_help()),
            )],
        }
    }

    async fn execute(&self, chat_id: ChatId, command: BotCommand) -> Vec<Outbound> {
        match command {
            BotCommand::Start | BotCommand::Help => {
                vec![Outbound::plain(chat_id, command_help())]
            }
            BotCommand::Signals => self.list_pending(chat_id).await,
            BotCommand::Scan => self.scan(chat_id).await,
        }
    }

    /// Read-only listing of stored pending signals.
    async fn list_pending(&self, chat_id: ChatId) -> Vec<Outbound> {
        let pending = match self.store.list_by_status(SignalStatus::Pending).await {
            Ok(pending) => pending,
            Err(e) => {
                warn!(error = %e, "Failed to list pending signals");
                return vec![Outbound::plain(chat_id, "Could not load signals, try again later.")];
            }
        };

        if pending.is_empty() {
            return vec![Outbound::plain(chat_id, "No pending signals.")];
        }

        pending
            .iter()
            .map(|signal| Outbound::signal_card(chat_id, &SignalEvent::from_signal(signal, None)))
            .collect()
    }

    /// Side-effecting scan: run the generator and reply once per result.
    async fn scan(&self, chat_id: ChatId) -> Vec<Outbound> {
        let generated = match self.generator.generate().await {
            Ok(generated) => generated,
            Err(e) => {
                warn!(error = %e, "Scan failed");
                return vec![Outbound::plain(chat_id, "Scan failed, try again later.")];
            }
        };

        if generated.is_empty() {
            return vec![Outbound::plain(chat_id, "No tokens crossed the thresholds.")];
        }

        generated
            .iter()
            .map(|g| {
                Outbound::signal_card(
                    chat_id,
                    &SignalEvent::from_signal(&g.signal, Some(g.reason.clone())),
                )
            })
            .collect()
    }

    fn handle_callback(
        &self,
        chat_id: ChatId,
        callback_id: String,
        data: Option<String>,
    ) -> Vec<Outbound> {
        let ack = Outbound::CallbackAck { callback_id };

        if !self.allow_list.is_allowed(chat_id.0) {
            return vec![ack];
        }

        let Some(address) = data.as_deref().and_then(|d| d.strip_prefix(COPY_CALLBACK_PREFIX))
        else {
            debug!("Ignoring callback with unknown payload");
            return vec![ack];
        };

        // Echo the address back as a standalone monospace message so it can
        // be long-pressed and copied in the Telegram client.
        vec![
            ack,
            Outbound::Message {
                chat_id,
                text: format!("`{}`", escape_markdown(address)),
                keyboard: None,
                markdown: true,
            },
        ]
    }
}
