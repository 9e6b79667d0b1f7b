use serde::{Deserialize, Serialize};
use std::fmt;

/// Candle interval supported by the exchange kline endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    /// 1-minute candles
    Minute1,
    /// 3-minute candles
    Minute3,
    /// 5-minute candles
    Minute5,
    /// 15-minute candles
    Minute15,
    /// 30-minute candles
    Minute30,
    /// 1-hour candles
    Hour1,
    /// 2-hour candles
    Hour2,
    /// 4-hour candles
    Hour4,
    /// 6-hour candles
    Hour6,
    /// 12-hour candles
    Hour12,
    /// Daily candles
    Day1,
    /// Weekly candles
    Week1,
    /// Monthly candles
    Month1,
}

impl Interval {
    /// Wire token for the kline endpoint's `interval` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Minute1 => "1m",
            Interval::Minute3 => "3m",
            Interval::Minute5 => "5m",
            Interval::Minute15 => "15m",
            Interval::Minute30 => "30m",
            Interval::Hour1 => "1h",
            Interval::Hour2 => "2h",
            Interval::Hour4 => "4h",
            Interval::Hour6 => "6h",
            Interval::Hour12 => "12h",
            Interval::Day1 => "1d",
            Interval::Week1 => "1w",
            Interval::Month1 => "1M",
        }
    }

    /// Parse a wire token back into an interval.
    ///
    /// Matching is case sensitive: `1m` is one minute, `1M` is one month,
    /// and anything outside the exchange's token set is rejected.
    pub fn from_token(token: &str) -> Option<Interval> {
        match token {
            "1m" => Some(Interval::Minute1),
            "3m" => Some(Interval::Minute3),
            "5m" => Some(Interval::Minute5),
            "15m" => Some(Interval::Minute15),
            "30m" => Some(Interval::Minute30),
            "1h" => Some(Interval::Hour1),
            "2h" => Some(Interval::Hour2),
            "4h" => Some(Interval::Hour4),
            "6h" => Some(Interval::Hour6),
            "12h" => Some(Interval::Hour12),
            "1d" => Some(Interval::Day1),
            "1w" => Some(Interval::Week1),
            "1M" => Some(Interval::Month1),
            _ => None,
        }
    }

    /// Get all supported intervals
    pub fn all() -> Vec<Interval> {
        vec![
            Interval::Minute1,
            Interval::Minute3,
            Interval::Minute5,
            Interval::Minute15,
            Interval::Minute30,
            Interval::Hour1,
            Interval::Hour2,
            Interval::Hour4,
            Interval::Hour6,
            Interval::Hour12,
            Interval::Day1,
            Interval::Week1,
            Interval::Month1,
        ]
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for Interval {
    fn default() -> Self {
        Interval::Day1
    }
}
