//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use sigscout::adapter::outbound::sqlite::{create_pool, run_migrations, DbPool};
use teloxide::types::Update;

/// Temporary SQLite database for integration tests.
pub struct TempDb {
    path: PathBuf,
    pool: DbPool,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        path.push(format!("sigscout-{name}-{nanos}.db"));

        let url = format!("sqlite://{}", path.display());
        let pool = create_pool(&url).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");

        Self { path, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Build a webhook-shaped text message update.
pub fn message_update(chat_id: i64, text: &str) -> Update {
    let json = serde_json::json!({
        "update_id": 1,
        "message": {
            "message_id": 1001,
            "date": 1721000000,
            "chat": {"id": chat_id, "type": "private", "first_name": "Alice"},
            "from": {"id": chat_id, "is_bot": false, "first_name": "Alice"},
            "text": text
        }
    });
    serde_json::from_value(json).expect("valid message update")
}

/// Build a webhook-shaped callback query update.
pub fn callback_update(chat_id: i64, data: &str) -> Update {
    let json = serde_json::json!({
        "update_id": 2,
        "callback_query": {
            "id": "cbq-1",
            "from": {"id": chat_id, "is_bot": false, "first_name": "Alice"},
            "message": {
                "message_id": 1002,
                "date": 1721000000,
                "chat": {"id": chat_id, "type": "private", "first_name": "Alice"},
                "from": {"id": 7777, "is_bot": true, "first_name": "sigscout"},
                "text": "signal card"
            },
            "chat_instance": "-55",
            "data": data
        }
    });
    serde_json::from_value(json).expect("valid callback update")
}

/// Build an update carrying a message without any text.
pub fn textless_update(chat_id: i64) -> Update {
    let json = serde_json::json!({
        "update_id": 3,
        "message": {
            "message_id": 1003,
            "date": 1721000000,
            "chat": {"id": chat_id, "type": "private", "first_name": "Alice"},
            "from": {"id": chat_id, "is_bot": false, "first_name": "Alice"},
            "photo": [{"file_id": "f1", "file_unique_id": "u1", "width": 90, "height": 90}]
        }
    });
    serde_json::from_value(json).expect("valid textless update")
}
