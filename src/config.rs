//! Runtime configuration, read once from the environment at startup

use std::path::PathBuf;
use std::time::Duration;

/// Monitor configuration, passed to each component at construction.
#[derive(Debug, Clone)]
pub struct Config {
    /// Radar API bearer token.
    pub radar_token: String,
    /// Radar API base URL.
    pub radar_base_url: String,
    /// Location code to monitor.
    pub country_code: String,
    /// SQLite database path.
    pub db_path: PathBuf,
    /// Scheduler tick period.
    pub poll_interval: Duration,
    /// Telegram target; `None` disables sending.
    pub telegram: Option<TelegramConfig>,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

impl Config {
    /// Read configuration from environment variables.
    ///
    /// CLOUDFLARE_API_TOKEN=...   (required)
    /// COUNTRY_CODE=IR
    /// DB_PATH=traffic.db
    /// RADAR_BASE_URL=https://api.cloudflare.com/client/v4/radar
    /// TELEGRAM_BOT_TOKEN=...     (optional, together with TELEGRAM_CHAT_ID)
    /// TELEGRAM_CHAT_ID=...
    /// POLL_INTERVAL_SECS=60
    pub fn from_env() -> Result<Self, ConfigError> {
        let radar_token = std::env::var("CLOUDFLARE_API_TOKEN")
            .map_err(|_| ConfigError::MissingVar("CLOUDFLARE_API_TOKEN"))?;

        let radar_base_url = std::env::var("RADAR_BASE_URL")
            .unwrap_or_else(|_| crate::radar::RADAR_BASE_URL.to_string());

        let country_code = std::env::var("COUNTRY_CODE").unwrap_or_else(|_| "IR".to_string());

        let db_path = std::env::var("DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("traffic.db"));

        let poll_interval = match std::env::var("POLL_INTERVAL_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::Invalid {
                    var: "POLL_INTERVAL_SECS",
                    value: raw.clone(),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        var: "POLL_INTERVAL_SECS",
                        value: raw,
                    });
                }
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(60),
        };

        // Both Telegram variables or neither; a half-configured target is an
        // error rather than a silently dead notifier.
        let telegram = match (
            std::env::var("TELEGRAM_BOT_TOKEN").ok(),
            std::env::var("TELEGRAM_CHAT_ID").ok(),
        ) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramConfig { bot_token, chat_id }),
            (Some(_), None) => return Err(ConfigError::MissingVar("TELEGRAM_CHAT_ID")),
            (None, Some(_)) => return Err(ConfigError::MissingVar("TELEGRAM_BOT_TOKEN")),
            (None, None) => None,
        };

        Ok(Self {
            radar_token,
            radar_base_url,
            country_code,
            db_path,
            poll_interval,
            telegram,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}
