//! Authorization for inbound bot traffic.

use std::collections::HashSet;

use tracing::warn;

/// Fixed reply for senders that are not on the allow-list.
pub const REJECTION_MESSAGE: &str = "⛔ You are not authorized to use this bot.";

/// Set of chat identifiers permitted to invoke commands.
///
/// For private chats the chat id equals the numeric user id, so the
/// configured user ids double as chat ids.
#[derive(Debug, Clone)]
pub struct AllowList {
    ids: HashSet<i64>,
}

impl AllowList {
    #[must_use]
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Check whether a chat may issue commands. Rejections are logged.
    #[must_use]
    pub fn is_allowed(&self, chat_id: i64) -> bool {
        if self.ids.contains(&chat_id) {
            return true;
        }

        warn!(chat_id, "Rejecting message from unauthorized chat");
        false
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
