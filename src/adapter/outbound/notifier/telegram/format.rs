//! Message formatting for Telegram notifications.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::port::outbound::notifier::{Event, SignalEvent};

use super::notifier::TelegramConfig;

/// Callback payload prefix for the copy-address button.
pub const COPY_CALLBACK_PREFIX: &str = "copy_";

/// Format an event into a Telegram message, or None if the event is muted
/// by configuration.
pub fn format_event_message(
    event: &Event,
    config: &TelegramConfig,
) -> Option<(String, Option<InlineKeyboardMarkup>)> {
    match event {
        Event::SignalDetected(e) if config.notify_signals => Some((
            format_signal_message("🚨 New Signal", e),
            Some(signal_keyboard(e.address.as_str())),
        )),
        Event::SignalSucceeded(e) if config.notify_transitions => {
            Some((format_signal_message("✅ Target Hit", e), None))
        }
        Event::SignalExpired(e) if config.notify_transitions => {
            Some((format_signal_message("⌛ Signal Expired", e), None))
        }
        _ => None,
    }
}

/// Fixed signal template: name, address, prices to four decimal places and
/// an optional admission rationale.
pub fn format_signal_message(title: &str, event: &SignalEvent) -> String {
    let name = truncate(&event.name, 40);

    let mut msg = format!(
        "*{}*\n\
        \n\
        🪙 {}\n\
        📍 `{}`\n\
        💵 Buy: `{:.4}`\n\
        🎯 Sell: `{:.4}`",
        escape_markdown(title),
        escape_markdown(&name),
        escape_markdown(event.address.as_str()),
        event.buy_price,
        event.sell_price
    );

    if let Some(reason) = &event.reason {
        msg.push_str(&format!("\n📊 {}", escape_markdown(reason)));
    }

    msg
}

/// One-button keyboard whose activation echoes the address back to the chat.
#[must_use]
pub fn signal_keyboard(address: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[InlineKeyboardButton::callback(
        "📋 Copy Address",
        format!("{COPY_CALLBACK_PREFIX}{address}"),
    )]])
}

/// Truncate a string with ellipsis (Unicode-safe).
pub fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// Escape special characters for Telegram `MarkdownV2`.
pub fn escape_markdown(text: &str) -> String {
    let special_chars = [
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
    ];
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if special_chars.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}
