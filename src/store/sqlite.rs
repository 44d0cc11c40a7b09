//! SQLite-backed store for polled samples

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection};

use crate::radar::window::format_utc;

use super::Sample;

/// Rows older than this many minutes are pruned on every write.
pub const RETENTION_MINUTES: i64 = 100;

/// Append-only sample store over a local SQLite file.
///
/// Owned exclusively by the poll job; no connection sharing.
pub struct TrafficStore {
    conn: Mutex<Connection>,
}

impl TrafficStore {
    /// Open (or create) the store at `path` and apply the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Self::initialize(conn)
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;

             CREATE TABLE IF NOT EXISTS traffic (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 timestamp TEXT NOT NULL,
                 traffic_volume REAL NOT NULL,
                 traffic_trend REAL NOT NULL
             );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Insert one sample, then prune rows past the retention window.
    ///
    /// Returns the number of pruned rows.
    pub fn insert(&self, sample: &Sample) -> Result<usize, StoreError> {
        self.insert_at(sample, Utc::now())
    }

    /// Insert with an explicit clock for the retention cutoff.
    pub fn insert_at(&self, sample: &Sample, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO traffic (timestamp, traffic_volume, traffic_trend)
             VALUES (?1, ?2, ?3)",
            params![sample.timestamp, sample.traffic_volume, sample.traffic_trend],
        )?;

        // Fixed-width timestamps keep this TEXT comparison chronological.
        let cutoff = format_utc(now - Duration::minutes(RETENTION_MINUTES));
        let pruned =
            conn.execute("DELETE FROM traffic WHERE timestamp < ?1", params![cutoff])?;

        Ok(pruned)
    }

    /// All retained samples in insertion order.
    pub fn samples(&self) -> Result<Vec<Sample>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT timestamp, traffic_volume, traffic_trend FROM traffic ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Sample {
                timestamp: row.get(0)?,
                traffic_volume: row.get(1)?,
                traffic_trend: row.get(2)?,
            })
        })?;

        let mut samples = Vec::new();
        for row in rows {
            samples.push(row?);
        }
        Ok(samples)
    }
}

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to open database at {path}: {source}")]
    Open {
        path: String,
        source: rusqlite::Error,
    },

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
