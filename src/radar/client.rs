//! HTTP client for the Radar timeseries endpoints

use std::time::Duration;

use serde::Deserialize;

use super::window::{TimeWindow, AGG_INTERVAL};

/// Default Radar API base URL.
pub const RADAR_BASE_URL: &str = "https://api.cloudflare.com/client/v4/radar";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for reading one country's traffic series from the Radar API
#[derive(Debug, Clone)]
pub struct RadarClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    location: String,
}

impl RadarClient {
    pub fn new(token: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: RADAR_BASE_URL.to_string(),
            token: token.into(),
            location: location.into(),
        }
    }

    /// Override the API base URL (tests, gateways).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Traffic volume: last value of the netflows series for the window.
    pub async fn traffic_volume(&self, window: &TimeWindow) -> Result<f64, RadarError> {
        self.fetch_last("netflows/timeseries", window).await
    }

    /// Traffic trend: last value of the HTTP request series for the window.
    pub async fn traffic_trend(&self, window: &TimeWindow) -> Result<f64, RadarError> {
        self.fetch_last("http/timeseries", window).await
    }

    async fn fetch_last(&self, endpoint: &str, window: &TimeWindow) -> Result<f64, RadarError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let date_start = window.start_str();
        let date_end = window.end_str();

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[
                ("location", self.location.as_str()),
                ("aggInterval", AGG_INTERVAL),
                ("dateStart", date_start.as_str()),
                ("dateEnd", date_end.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| RadarError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RadarError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body: TimeseriesResponse = response
            .json()
            .await
            .map_err(|e| RadarError::Deserialization(e.to_string()))?;

        Ok(body.result.last_value())
    }
}

/// Envelope of a Radar timeseries response.
#[derive(Debug, Deserialize)]
pub struct TimeseriesResponse {
    pub result: TimeseriesResult,
}

/// The `result` object; `serie_0` is absent when the window has no data.
#[derive(Debug, Default, Deserialize)]
pub struct TimeseriesResult {
    pub serie_0: Option<Serie>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Serie {
    #[serde(default)]
    pub values: Vec<serde_json::Value>,
}

impl TimeseriesResult {
    /// Last value of the series, or 0.0 when the series or values are absent.
    ///
    /// Radar serves series values both as JSON numbers and as decimal strings.
    pub fn last_value(&self) -> f64 {
        self.serie_0
            .as_ref()
            .and_then(|serie| serie.values.last())
            .and_then(coerce_f64)
            .unwrap_or(0.0)
    }
}

fn coerce_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Radar fetch errors
#[derive(Debug, thiserror::Error)]
pub enum RadarError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Radar API returned status {status} for {endpoint}")]
    Api { endpoint: String, status: u16 },

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}
