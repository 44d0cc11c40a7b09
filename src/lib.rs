//! Radarmon: Country Traffic Monitor
//!
//! Polls the Cloudflare Radar API for one country's traffic volume and trend
//! on a fixed interval, persists samples to a local SQLite file with a
//! 100-minute retention window, and pushes a Telegram message when the trend
//! turns positive.
//!
//! # Features
//!
//! - **Windowed Fetches**: minute-truncated 15-minute windows, lagged behind
//!   wall clock to match upstream aggregation
//! - **Embedded Storage**: one `traffic` row per run, rows past retention
//!   pruned on every write
//! - **Sign-Check Alerting**: a positive trend sends one Telegram message
//! - **Graceful Shutdown**: interval scheduler stopped on Ctrl-C
//!
//! # Example
//!
//! ```no_run
//! use radarmon::poller::PollJob;
//! use radarmon::radar::RadarClient;
//! use radarmon::store::TrafficStore;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let radar = RadarClient::new("api-token", "IR");
//! let store = TrafficStore::open("traffic.db")?;
//! let job = PollJob::new(radar, store, None, "IR");
//!
//! let report = job.run_once().await?;
//! println!("{}", report.message);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod notify;
pub mod poller;
pub mod radar;
pub mod store;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types
pub use config::Config;
pub use poller::{PollJob, PollWorker};
pub use radar::{RadarClient, TimeWindow};
pub use store::{Sample, TrafficStore};
