//! Radarmon
//!
//! Run with: cargo run
//!
//! Environment variables:
//! - CLOUDFLARE_API_TOKEN: Radar API bearer token (required)
//! - COUNTRY_CODE: Location code to monitor (default: IR)
//! - DB_PATH: SQLite database path (default: traffic.db)
//! - RADAR_BASE_URL: Radar API base URL override
//! - TELEGRAM_BOT_TOKEN: Telegram bot token (optional, with TELEGRAM_CHAT_ID)
//! - TELEGRAM_CHAT_ID: Telegram chat to notify
//! - POLL_INTERVAL_SECS: Poll interval in seconds (default: 60)
//! - RUST_LOG: Log level (default: info)

use radarmon::config::Config;
use radarmon::notify::TelegramNotifier;
use radarmon::poller::{PollJob, PollWorker};
use radarmon::radar::RadarClient;
use radarmon::store::TrafficStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "radarmon=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Radarmon configuration:");
    tracing::info!("  Country: {}", config.country_code);
    tracing::info!("  Database: {}", config.db_path.display());
    tracing::info!("  Radar base URL: {}", config.radar_base_url);
    tracing::info!(
        "  Poll interval: {} seconds",
        config.poll_interval.as_secs()
    );
    match &config.telegram {
        Some(telegram) => tracing::info!("  Telegram chat: {}", telegram.chat_id),
        None => tracing::info!("  Telegram: not configured, positive trends are only logged"),
    }

    let store = TrafficStore::open(&config.db_path)?;
    let radar = RadarClient::new(config.radar_token.clone(), config.country_code.clone())
        .with_base_url(config.radar_base_url.clone());
    let notifier = config
        .telegram
        .as_ref()
        .map(|t| TelegramNotifier::new(t.bot_token.clone(), t.chat_id.clone()));

    let job = PollJob::new(radar, store, notifier, config.country_code.clone());

    let mut worker = PollWorker::new(config.poll_interval);
    let handle = worker.start(job);

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    worker.stop().await;
    handle.await?;

    Ok(())
}
