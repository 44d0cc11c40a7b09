//! Local sample storage with fixed-window retention

pub mod sample;
pub mod sqlite;

pub use sample::Sample;
pub use sqlite::{StoreError, TrafficStore, RETENTION_MINUTES};
