//! Background polling worker

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::interval;

use super::job::PollJob;

/// Scheduler driving the poll job on a fixed interval.
///
/// The job is awaited to completion before the next tick is observed, so runs
/// never overlap. A failed run is logged and the next tick proceeds.
pub struct PollWorker {
    interval: Duration,
    shutdown_tx: Option<mpsc::Sender<()>>,
}

impl PollWorker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            shutdown_tx: None,
        }
    }

    /// Start the background worker; the first tick fires immediately.
    pub fn start(&mut self, job: PollJob) -> tokio::task::JoinHandle<()> {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        self.shutdown_tx = Some(shutdown_tx);

        let period = self.interval;
        tokio::spawn(async move {
            tracing::info!("Poll worker started with interval {:?}", period);

            let mut ticker = interval(period);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match job.run_once().await {
                            Ok(report) => {
                                tracing::debug!(
                                    timestamp = %report.sample.timestamp,
                                    notified = report.notified,
                                    "Poll job completed"
                                );
                            }
                            Err(e) => {
                                tracing::error!(error = %e, "Poll job failed");
                            }
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        tracing::info!("Poll worker shutting down");
                        break;
                    }
                }
            }
        })
    }

    /// Signal the worker to stop after any in-flight run.
    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::TelegramNotifier;
    use crate::radar::RadarClient;
    use crate::store::TrafficStore;
    use crate::testutil::{spawn_radar_stub, spawn_telegram_stub};
    use serde_json::json;

    #[tokio::test]
    async fn test_worker_runs_and_stops() {
        let radar = spawn_radar_stub(vec![json!(1.0)], vec![json!(0.5)]).await;
        let telegram = spawn_telegram_stub("bot-token").await;
        let store = TrafficStore::open_in_memory().unwrap();

        let job = PollJob::new(
            RadarClient::new("token", "IR").with_base_url(radar.base_url.clone()),
            store,
            Some(TelegramNotifier::new("bot-token", "42").with_base_url(telegram.base_url.clone())),
            "IR",
        );

        let mut worker = PollWorker::new(Duration::from_millis(20));
        let handle = worker.start(job);

        tokio::time::sleep(Duration::from_millis(100)).await;
        worker.stop().await;
        handle.await.unwrap();

        // First tick fires immediately, so at least one run completed.
        assert!(telegram.sent_count() >= 1);
    }

    #[tokio::test]
    async fn test_failed_runs_do_not_stop_the_worker() {
        // No stub server; every fetch fails, the worker keeps ticking.
        let store = TrafficStore::open_in_memory().unwrap();
        let job = PollJob::new(
            RadarClient::new("token", "IR").with_base_url("http://127.0.0.1:1".to_string()),
            store,
            None,
            "IR",
        );

        let mut worker = PollWorker::new(Duration::from_millis(10));
        let handle = worker.start(job);

        tokio::time::sleep(Duration::from_millis(60)).await;
        worker.stop().await;
        handle.await.unwrap();
    }
}
