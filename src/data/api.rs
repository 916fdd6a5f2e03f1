//! Alpha Vantage client for daily price series.

use serde_json::Value;

use crate::data::OhlcBar;
use crate::data::error::DataError;
use crate::data::transform::parse_time_series;

const BASE_URL: &str = "https://www.alphavantage.co/query";
const DAILY_FUNCTION: &str = "TIME_SERIES_DAILY";
const TIME_SERIES_KEY: &str = "Time Series (Daily)";

/// API key env var; the free `demo` key is used when unset.
const API_KEY_VAR: &str = "RATIOSCOPE_API_KEY";

pub struct AlphaVantageClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageClient {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        let api_key = std::env::var(API_KEY_VAR).unwrap_or_else(|_| "demo".to_string());
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Fetches the full daily series for a symbol, ascending by date.
    ///
    /// A top-level `"Error Message"` in the payload is an API error; a
    /// `"Note"` is a rate-limit warning and whatever data arrived alongside
    /// it is still used.
    pub async fn fetch_daily_series(&self, symbol: &str) -> Result<Vec<OhlcBar>, DataError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("function", DAILY_FUNCTION),
                ("symbol", symbol),
                ("apikey", &self.api_key),
                ("outputsize", "full"),
                ("datatype", "json"),
            ])
            .send()
            .await?;

        let payload: Value = response.json().await?;

        if let Some(message) = payload.get("Error Message").and_then(Value::as_str) {
            return Err(DataError::Api(message.to_string()));
        }
        if let Some(note) = payload.get("Note").and_then(Value::as_str) {
            log::warn!("API rate limit warning: {note}");
        }

        let series = payload
            .get(TIME_SERIES_KEY)
            .and_then(Value::as_object)
            .ok_or_else(|| DataError::MissingSeries(symbol.to_string()))?;

        parse_time_series(series)
    }
}

impl Default for AlphaVantageClient {
    fn default() -> Self {
        Self::new()
    }
}
