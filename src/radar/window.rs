//! Query window calculation

use chrono::{DateTime, Duration, Timelike, Utc};

/// Aggregation bucket width the upstream API aligns its series to.
pub const AGG_INTERVAL: &str = "15m";

/// Window lag and width, in minutes, matching [`AGG_INTERVAL`].
const WINDOW_MINUTES: i64 = 15;

/// Timestamp format the Radar API requires, also used for stored rows.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format a UTC timestamp as fixed-width `YYYY-mm-ddTHH:MM:SSZ`.
///
/// The fixed width keeps lexicographic ordering of the stored TEXT column
/// chronological, which the retention DELETE relies on.
pub fn format_utc(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Query window for one poll, aligned to the upstream aggregation interval.
///
/// The end lags "now" by one interval so the bucket is fully aggregated
/// upstream; the width is one interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window for the current wall-clock time.
    pub fn current() -> Self {
        Self::at(Utc::now())
    }

    /// Window for an arbitrary "now".
    pub fn at(now: DateTime<Utc>) -> Self {
        let now = now
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .expect("zero is in range for seconds and nanoseconds");
        let end = now - Duration::minutes(WINDOW_MINUTES);
        let start = end - Duration::minutes(WINDOW_MINUTES);
        Self { start, end }
    }

    pub fn start_str(&self) -> String {
        format_utc(self.start)
    }

    pub fn end_str(&self) -> String {
        format_utc(self.end)
    }
}
