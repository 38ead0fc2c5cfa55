//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable
//! overrides for sensitive values (`TELEGRAM_BOT_TOKEN`, `DATABASE_URL`).

use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::domain::ScreenConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub webhook: WebhookSettings,
    #[serde(default)]
    pub feed: FeedSettings,
    #[serde(default)]
    pub screener: ScreenerSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Telegram bot settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TelegramSettings {
    /// Bot API token; overridden by `TELEGRAM_BOT_TOKEN`.
    pub bot_token: String,
    /// Chat that receives push notifications.
    pub chat_id: i64,
    /// Chat/user ids permitted to invoke commands.
    pub allowed_user_ids: Vec<i64>,
    pub notify_signals: bool,
    pub notify_transitions: bool,
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: 0,
            allowed_user_ids: Vec::new(),
            notify_signals: true,
            notify_transitions: true,
        }
    }
}

/// Database settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Connection string; overridden by `DATABASE_URL`.
    pub url: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sigscout.db".into(),
        }
    }
}

/// Webhook server settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WebhookSettings {
    /// Externally visible hostname used to build the callback URL.
    pub public_host: String,
    /// Local listen address.
    pub bind_addr: String,
}

impl Default for WebhookSettings {
    fn default() -> Self {
        Self {
            public_host: String::new(),
            bind_addr: "0.0.0.0:8080".into(),
        }
    }
}

/// Price feed settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            url: "https://api.dexscreener.com/latest/dex/pairs/solana".into(),
            timeout_secs: 10,
        }
    }
}

/// Screening thresholds and scan cadence.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScreenerSettings {
    pub min_liquidity: Decimal,
    pub min_volume: Decimal,
    pub sell_multiplier: Decimal,
    pub max_pending_age_hours: i64,
    pub interval_secs: u64,
}

impl Default for ScreenerSettings {
    fn default() -> Self {
        Self {
            min_liquidity: dec!(5000),
            min_volume: dec!(1000),
            sell_multiplier: dec!(1.3),
            max_pending_age_hours: 24,
            interval_secs: 600,
        }
    }
}

impl ScreenerSettings {
    #[must_use]
    pub fn screen(&self) -> ScreenConfig {
        ScreenConfig {
            min_liquidity: self.min_liquidity,
            min_volume: self.min_volume,
            sell_multiplier: self.sell_multiplier,
        }
    }

    #[must_use]
    pub fn max_pending_age(&self) -> chrono::Duration {
        chrono::Duration::hours(self.max_pending_age_hours)
    }

    #[must_use]
    pub fn interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.interval_secs)
    }
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, apply environment overrides and
    /// validate the result.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let mut config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            self.telegram.bot_token = token;
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database.url = url;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.telegram.bot_token.is_empty() {
            return Err(ConfigError::MissingField {
                field: "telegram.bot_token",
            }
            .into());
        }
        if self.telegram.chat_id == 0 {
            return Err(ConfigError::MissingField {
                field: "telegram.chat_id",
            }
            .into());
        }
        if self.telegram.allowed_user_ids.is_empty() {
            return Err(ConfigError::MissingField {
                field: "telegram.allowed_user_ids",
            }
            .into());
        }
        if self.webhook.public_host.is_empty() {
            return Err(ConfigError::MissingField {
                field: "webhook.public_host",
            }
            .into());
        }
        if self.screener.sell_multiplier <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "screener.sell_multiplier",
                reason: "must be positive".into(),
            }
            .into());
        }
        if self.screener.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "screener.interval_secs",
                reason: "must be positive".into(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    /// Mutex to serialize tests that modify environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const MINIMAL: &str = r#"
        [telegram]
        bot_token = "123:abc"
        chat_id = 42
        allowed_user_ids = [42]

        [webhook]
        public_host = "bot.example.com"
    "#;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("TELEGRAM_BOT_TOKEN");
        std::env::remove_var("DATABASE_URL");

        let file = write_config(MINIMAL);
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.telegram.bot_token, "123:abc");
        assert_eq!(config.telegram.chat_id, 42);
        assert!(config.telegram.notify_signals);
        assert_eq!(config.database.url, "sigscout.db");
        assert_eq!(config.webhook.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.screener.min_liquidity, dec!(5000));
        assert_eq!(config.screener.min_volume, dec!(1000));
        assert_eq!(config.screener.sell_multiplier, dec!(1.3));
        assert_eq!(config.screener.interval_secs, 600);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn missing_token_is_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("TELEGRAM_BOT_TOKEN");

        let file = write_config(
            r#"
            [telegram]
            chat_id = 42
            allowed_user_ids = [42]

            [webhook]
            public_host = "bot.example.com"
        "#,
        );

        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("telegram.bot_token"));
    }

    #[test]
    fn empty_allow_list_is_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("TELEGRAM_BOT_TOKEN");

        let file = write_config(
            r#"
            [telegram]
            bot_token = "123:abc"
            chat_id = 42
            allowed_user_ids = []

            [webhook]
            public_host = "bot.example.com"
        "#,
        );

        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("allowed_user_ids"));
    }

    #[test]
    fn env_overrides_win_over_file_values() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("TELEGRAM_BOT_TOKEN", "999:env");
        std::env::set_var("DATABASE_URL", "sqlite:///tmp/env.db");

        let file = write_config(MINIMAL);
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.telegram.bot_token, "999:env");
        assert_eq!(config.database.url, "sqlite:///tmp/env.db");

        std::env::remove_var("TELEGRAM_BOT_TOKEN");
        std::env::remove_var("DATABASE_URL");
    }

    #[test]
    fn screener_settings_convert_to_domain_types() {
        let settings = ScreenerSettings::default();
        let screen = settings.screen();

        assert_eq!(screen.min_liquidity, dec!(5000));
        assert_eq!(screen.sell_multiplier, dec!(1.3));
        assert_eq!(settings.max_pending_age(), chrono::Duration::hours(24));
        assert_eq!(settings.interval(), std::time::Duration::from_secs(600));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("TELEGRAM_BOT_TOKEN");

        let file = write_config(
            r#"
            [telegram]
            bot_token = "123:abc"
            chat_id = 42
            allowed_user_ids = [42]

            [webhook]
            public_host = "bot.example.com"

            [screener]
            interval_secs = 0
        "#,
        );

        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("interval_secs"));
    }

    #[test]
    fn unreadable_file_is_a_config_error() {
        let err = Config::load("/nonexistent/sigscout.toml").unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
