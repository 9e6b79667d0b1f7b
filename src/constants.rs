//! Shared limits and wire-format constants.

/// Seconds a symbol catalog snapshot stays fresh before the next request
/// triggers a rebuild.
pub const CATALOG_REFRESH_SECONDS: i64 = 86_400;

/// Maximum number of candles kept in a chart series. When the exchange
/// returns more, the oldest candles are dropped.
pub const MAX_SERIES_CANDLES: usize = 100;

/// Timeout for regular exchange requests, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Timeout for the health probe, in seconds. Kept short so a status report
/// answers quickly even when the exchange is down.
pub const HEALTH_TIMEOUT_SECS: u64 = 5;

/// Column indices for kline rows (0-indexed).
///
/// The exchange returns each candle as a JSON array mixing numbers and
/// strings: timestamps are integer milliseconds, prices and volumes are
/// decimal strings.
pub mod kline_column {
    pub const START_TIME: usize = 0;
    pub const OPEN: usize = 1;
    pub const HIGH: usize = 2;
    pub const LOW: usize = 3;
    pub const CLOSE: usize = 4;
    pub const VOLUME: usize = 5;
    pub const END_TIME: usize = 6;
    pub const QUOTE_ASSET_VOLUME: usize = 7;
    pub const TRADES: usize = 8;
    pub const TAKER_BASE_VOLUME: usize = 9;
    pub const TAKER_QUOTE_VOLUME: usize = 10;
}
