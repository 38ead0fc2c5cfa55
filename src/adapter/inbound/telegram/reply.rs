//! Delivery of dispatcher actions through the Bot API.

use teloxide::prelude::*;
use teloxide::types::{BotCommand, ParseMode};
use tracing::{error, info};

use super::command::bot_commands;
use super::dispatch::Outbound;

/// Send every outbound action, logging failures and carrying on.
///
/// Delivery is best-effort: a failed send never aborts the remaining
/// actions and never fails the webhook request that produced them.
pub async fn deliver(bot: &Bot, actions: Vec<Outbound>) {
    for action in actions {
        match action {
            Outbound::Message {
                chat_id,
                text,
                keyboard,
                markdown,
            } => {
                let mut request = bot.send_message(chat_id, &text);
                if markdown {
                    request = request.parse_mode(ParseMode::MarkdownV2);
                }
                if let Some(keyboard) = keyboard {
                    request = request.reply_markup(keyboard);
                }
                if let Err(e) = request.await {
                    error!(error = %e, chat_id = chat_id.0, "Failed to send reply");
                }
            }
            Outbound::CallbackAck { callback_id } => {
                if let Err(e) = bot.answer_callback_query(callback_id).await {
                    error!(error = %e, "Failed to answer callback query");
                }
            }
        }
    }
}

/// Register bot commands with Telegram for the "/" menu.
pub async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
