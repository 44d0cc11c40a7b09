//! One polling job run: window, fetch, store, notify

use crate::notify::TelegramNotifier;
use crate::radar::{RadarClient, RadarError, TimeWindow};
use crate::store::{Sample, StoreError, TrafficStore};

/// Outcome of a successful job run.
#[derive(Debug, Clone)]
pub struct JobReport {
    pub sample: Sample,
    pub message: String,
    /// Whether a Telegram notification was delivered.
    pub notified: bool,
}

/// The per-tick unit of work: fetch both metrics for the current window,
/// persist the sample, and notify on a positive trend.
pub struct PollJob {
    radar: RadarClient,
    store: TrafficStore,
    notifier: Option<TelegramNotifier>,
    country: String,
}

impl PollJob {
    pub fn new(
        radar: RadarClient,
        store: TrafficStore,
        notifier: Option<TelegramNotifier>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            radar,
            store,
            notifier,
            country: country.into(),
        }
    }

    /// Run one job for the current wall-clock window.
    pub async fn run_once(&self) -> Result<JobReport, JobError> {
        self.run_at(TimeWindow::current()).await
    }

    /// Run one job for an explicit window.
    pub async fn run_at(&self, window: TimeWindow) -> Result<JobReport, JobError> {
        let volume = self.radar.traffic_volume(&window).await?;
        let trend = self.radar.traffic_trend(&window).await?;

        let sample = Sample {
            timestamp: window.end_str(),
            traffic_volume: volume,
            traffic_trend: trend,
        };
        let pruned = self.store.insert(&sample)?;
        if pruned > 0 {
            tracing::debug!(pruned, "Pruned samples past retention");
        }

        let message = format_report(&self.country, &sample);
        tracing::info!("{}", message);

        // A failed send never fails the run; the sample is already stored.
        let mut notified = false;
        if sample.traffic_trend > 0.0 {
            match &self.notifier {
                Some(notifier) => match notifier.send(&message).await {
                    Ok(()) => notified = true,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to send Telegram notification");
                    }
                },
                None => {
                    tracing::info!("Trend positive, no Telegram target configured");
                }
            }
        }

        Ok(JobReport {
            sample,
            message,
            notified,
        })
    }
}

/// Report line logged on every run and sent to Telegram on a positive trend.
pub fn format_report(country: &str, sample: &Sample) -> String {
    format!(
        "[{}] {} traffic | volume={:.4} trend={:.4}",
        sample.timestamp, country, sample.traffic_volume, sample.traffic_trend
    )
}

/// Job errors; any of these fails the tick, is logged by the worker, and the
/// next tick proceeds
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] RadarError),

    #[error("Store failed: {0}")]
    Store(#[from] StoreError),
}
