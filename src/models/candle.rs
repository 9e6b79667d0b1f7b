use crate::models::Interval;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV candle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket start time.
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Base asset volume, when the exchange reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

/// Chart series for one symbol, candles in ascending time order.
///
/// An empty series means the exchange had no data for the symbol and
/// interval. Callers treat that as a normal outcome, not a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Display form of the symbol, e.g. `BTC`.
    pub symbol: String,
    pub interval: Interval,
    pub candles: Vec<Candle>,
}

impl Series {
    pub fn empty(symbol: String, interval: Interval) -> Self {
        Self {
            symbol,
            interval,
            candles: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Most recent candle, which may still be in progress.
    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }
}
