//! One-shot Radar probe
//!
//! Fetches both traffic metrics for the current window and prints them,
//! without touching the database or Telegram. Useful for checking the API
//! token and inspecting current values.
//!
//! Run with: cargo run --bin probe

use radarmon::config::Config;
use radarmon::radar::{RadarClient, TimeWindow};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "radarmon=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let radar = RadarClient::new(config.radar_token.clone(), config.country_code.clone())
        .with_base_url(config.radar_base_url.clone());

    let window = TimeWindow::current();
    let volume = radar.traffic_volume(&window).await?;
    let trend = radar.traffic_trend(&window).await?;

    println!("========== Cloudflare Radar ==========");
    println!("Country        : {}", config.country_code);
    println!(
        "Time window    : {}  ->  {}",
        window.start_str(),
        window.end_str()
    );
    println!("--------------------------------------");
    println!("Traffic volume : {}", volume);
    println!("Traffic trend  : {}", trend);
    println!("--------------------------------------");
    println!("SQL example:");
    println!(
        "INSERT INTO traffic (timestamp, traffic_volume, traffic_trend)\nVALUES ('{}', {}, {});",
        window.end_str(),
        volume,
        trend
    );

    Ok(())
}
