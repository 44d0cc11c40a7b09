//! The stored sample type

use serde::{Deserialize, Serialize};

/// One polled traffic sample.
///
/// Created once per job run, never mutated, pruned once older than the
/// retention window. The timestamp is the query window's end, formatted as
/// fixed-width `YYYY-mm-ddTHH:MM:SSZ`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: String,
    pub traffic_volume: f64,
    pub traffic_trend: f64,
}
