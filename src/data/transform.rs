//! Series parsing and the base/quote ratio computation.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::data::OhlcBar;
use crate::data::error::DataError;

/// Parses an Alpha Vantage `"Time Series (Daily)"` object into bars sorted
/// ascending by date. Numeric fields arrive as strings; intraday-adjusted
/// payloads use `"6. volume"` where plain daily uses `"5. volume"`.
pub fn parse_time_series(series: &Map<String, Value>) -> Result<Vec<OhlcBar>, DataError> {
    let mut bars = Vec::with_capacity(series.len());

    for (date, fields) in series {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| DataError::Malformed(format!("bad date {date:?}: {e}")))?;
        let volume = field(fields, "6. volume").or_else(|_| field(fields, "5. volume"))?;
        bars.push(OhlcBar {
            date,
            open: field(fields, "1. open")?,
            high: field(fields, "2. high")?,
            low: field(fields, "3. low")?,
            close: field(fields, "4. close")?,
            volume,
        });
    }

    bars.sort_by_key(|bar| bar.date);
    Ok(bars)
}

fn field(fields: &Value, key: &str) -> Result<f64, DataError> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| DataError::Malformed(format!("missing field {key:?}")))?
        .parse::<f64>()
        .map_err(|e| DataError::Malformed(format!("bad number in {key:?}: {e}")))
}

/// Divides the base series by the quote series, date by date.
///
/// Open and close are plain quotients; low/high are widened to cover both
/// quotients so every candle stays well-formed; volume is the mean of the two
/// volumes. Dates missing from the quote series are dropped. Output is
/// ascending by date.
pub fn ratio_series(base: &[OhlcBar], quote: &[OhlcBar]) -> Vec<OhlcBar> {
    let by_date: HashMap<NaiveDate, &OhlcBar> = quote.iter().map(|bar| (bar.date, bar)).collect();

    let mut out: Vec<OhlcBar> = base
        .iter()
        .filter_map(|b| {
            let q = by_date.get(&b.date)?;
            let open = b.open / q.open;
            let close = b.close / q.close;
            let low = open.min(close).min(b.low / q.low);
            let high = open.max(close).max(b.high / q.high);
            Some(OhlcBar {
                date: b.date,
                open,
                high,
                low,
                close,
                volume: (b.volume + q.volume) / 2.0,
            })
        })
        .collect();

    out.sort_by_key(|bar| bar.date);
    out
}

/// Initial visible window, in percent of the full series: roughly the last
/// 250 bars.
pub fn initial_display_range(total_bars: usize) -> (f64, f64) {
    if total_bars <= 250 {
        return (0.0, 100.0);
    }
    let start = ((total_bars - 250) as f64 / total_bars as f64 * 100.0).floor();
    (start.max(0.0), 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bar(date: &str, open: f64, high: f64, low: f64, close: f64, volume: f64) -> OhlcBar {
        OhlcBar {
            date: date.parse().unwrap(),
            open,
            high,
            low,
            close,
            volume,
        }
    }

    #[test]
    fn parses_and_sorts_ascending() {
        let series = json!({
            "2024-01-03": {
                "1. open": "10.0", "2. high": "11.0", "3. low": "9.0",
                "4. close": "10.5", "5. volume": "1000"
            },
            "2024-01-02": {
                "1. open": "9.0", "2. high": "10.0", "3. low": "8.5",
                "4. close": "9.8", "6. volume": "900"
            },
        });
        let bars = parse_time_series(series.as_object().unwrap()).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date.to_string(), "2024-01-02");
        assert_eq!(bars[0].volume, 900.0);
        assert_eq!(bars[1].close, 10.5);
    }

    #[test]
    fn bad_number_is_an_error() {
        let series = json!({
            "2024-01-02": {
                "1. open": "not-a-number", "2. high": "10.0", "3. low": "8.5",
                "4. close": "9.8", "5. volume": "900"
            },
        });
        let result = parse_time_series(series.as_object().unwrap());
        assert!(matches!(result, Err(DataError::Malformed(_))));
    }

    #[test]
    fn ratio_divides_matching_dates() {
        let base = vec![bar("2024-01-02", 20.0, 24.0, 18.0, 22.0, 1000.0)];
        let quote = vec![bar("2024-01-02", 10.0, 12.0, 9.0, 11.0, 500.0)];

        let out = ratio_series(&base, &quote);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].open, 2.0);
        assert_eq!(out[0].close, 22.0 / 11.0);
        assert!(out[0].low <= out[0].open.min(out[0].close));
        assert!(out[0].high >= out[0].open.max(out[0].close));
        assert_eq!(out[0].volume, 750.0);
    }

    #[test]
    fn ratio_drops_dates_missing_from_quote() {
        let base = vec![
            bar("2024-01-02", 20.0, 24.0, 18.0, 22.0, 1000.0),
            bar("2024-01-03", 21.0, 25.0, 19.0, 23.0, 1100.0),
        ];
        let quote = vec![bar("2024-01-03", 10.0, 12.0, 9.0, 11.0, 500.0)];

        let out = ratio_series(&base, &quote);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].date.to_string(), "2024-01-03");
    }

    #[test]
    fn ratio_low_high_cover_open_and_close() {
        // Chosen so base.low/quote.low alone would sit above the close ratio.
        let base = vec![bar("2024-01-02", 30.0, 31.0, 29.0, 10.0, 100.0)];
        let quote = vec![bar("2024-01-02", 10.0, 10.5, 2.0, 10.0, 100.0)];

        let out = ratio_series(&base, &quote);

        assert!(out[0].low <= 1.0);
        assert!(out[0].high >= 3.0);
    }

    #[test]
    fn initial_range_shows_full_short_series() {
        assert_eq!(initial_display_range(100), (0.0, 100.0));
        assert_eq!(initial_display_range(250), (0.0, 100.0));
    }

    #[test]
    fn initial_range_trims_long_series_to_recent_bars() {
        let (start, end) = initial_display_range(1000);
        assert_eq!(end, 100.0);
        assert_eq!(start, 75.0);
    }
}
