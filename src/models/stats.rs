use serde::{Deserialize, Serialize};
use std::fmt;

/// 24-hour statistics for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Display form of the symbol, e.g. `BTC`.
    pub symbol: String,
    /// Last traded price.
    pub last: f64,
    /// Price at the start of the 24-hour window.
    pub open: f64,
    pub high: f64,
    pub low: f64,
    /// Percent change over the last completed hour, when hourly candles
    /// were available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_1h: Option<f64>,
    /// Percent change over the 24-hour window.
    pub change_24h: f64,
}

/// Statistics outcome for one requested symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatsReply {
    Snapshot(StatsSnapshot),
    /// Human-readable notice that no statistics could be produced.
    Unavailable(String),
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "24h {} Stats:", self.symbol)?;
        writeln!(f)?;
        writeln!(f, "Current price: ${}", self.last)?;
        writeln!(f, "Open: ${}", self.open)?;
        writeln!(f, "High: ${}", self.high)?;
        writeln!(f, "Low: ${}", self.low)?;
        if let Some(change_1h) = self.change_1h {
            writeln!(f, "1h Change: {:.2}%", change_1h)?;
        }
        write!(f, "24h Change: {:.2}%", self.change_24h)
    }
}

impl fmt::Display for StatsReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsReply::Snapshot(snapshot) => fmt::Display::fmt(snapshot, f),
            StatsReply::Unavailable(notice) => f.write_str(notice),
        }
    }
}
