//! Cloudflare Radar API access
//!
//! Provides the query-window arithmetic and the HTTP client for the two
//! timeseries endpoints the monitor reads.

pub mod client;
pub mod window;

pub use client::{RadarClient, RadarError, TimeseriesResponse, TimeseriesResult, RADAR_BASE_URL};
pub use window::{format_utc, TimeWindow, AGG_INTERVAL};
