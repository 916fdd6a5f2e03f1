//! Price series loading: remote fetch, same-day cache, ratio computation.

pub mod api;
pub mod cache;
pub mod error;
pub mod transform;

use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use api::AlphaVantageClient;
use cache::{CachedSeries, SeriesCache};
use error::DataError;
use transform::ratio_series;

/// One daily OHLCV record. Series are kept ascending by date.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OhlcBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcBar {
    /// Midnight UTC of the bar's date in epoch milliseconds, the x value the
    /// coordinate mapper works in.
    pub fn timestamp_ms(&self) -> f64 {
        self.date
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp_millis() as f64
    }
}

/// Loads the base/quote ratio series, serving per-symbol daily data from the
/// cache when it was already fetched today.
pub async fn load_ratio_series(
    client: &AlphaVantageClient,
    cache: Option<&SeriesCache>,
    base_symbol: &str,
    quote_symbol: &str,
) -> Result<Vec<OhlcBar>, DataError> {
    let today = Utc::now().date_naive();

    let base_data = fetch_with_cache(client, cache, base_symbol, today).await?;
    let quote_data = fetch_with_cache(client, cache, quote_symbol, today).await?;

    if base_data.is_empty() || quote_data.is_empty() {
        return Err(DataError::Empty);
    }

    Ok(ratio_series(&base_data, &quote_data))
}

async fn fetch_with_cache(
    client: &AlphaVantageClient,
    cache: Option<&SeriesCache>,
    symbol: &str,
    today: NaiveDate,
) -> Result<Vec<OhlcBar>, DataError> {
    if let Some(cache) = cache
        && let Some(data) = cache.get_fresh(symbol, today)
    {
        log::info!("using cached data for {symbol}");
        return Ok(data);
    }

    log::info!("fetching fresh data for {symbol}");
    let data = client.fetch_daily_series(symbol).await?;

    if let Some(cache) = cache {
        cache.put(CachedSeries {
            symbol: symbol.to_string(),
            last_updated: today,
            data: data.clone(),
        });
    }

    Ok(data)
}
