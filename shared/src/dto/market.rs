use serde::{Deserialize, Serialize};

/// Current price for a symbol from `GET /api/v1/data/price`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceQuote {
    pub symbol: String,
    pub price: f64,
    pub timestamp: i64,
    pub provider: String,
    #[serde(default)]
    pub cached: bool,
}

/// One OHLCV candle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Candle series from `GET /api/v1/data/ohlcv`.
///
/// `data` is kept in the order the server sent it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OhlcvSeries {
    pub symbol: String,
    pub interval: String,
    pub data: Vec<Candle>,
    pub provider: String,
    #[serde(default)]
    pub cached: bool,
}

impl OhlcvSeries {
    /// Close of the last candle, if any.
    pub fn last_close(&self) -> Option<f64> {
        self.data.last().map(|c| c.close)
    }
}
