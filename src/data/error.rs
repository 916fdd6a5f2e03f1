//! Data-layer error type.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("no daily series available for symbol: {0}")]
    MissingSeries(String),

    #[error("malformed series data: {0}")]
    Malformed(String),

    #[error("no data received for one or both symbols")]
    Empty,
}
