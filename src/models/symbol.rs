use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// One tradeable listing from the exchange symbol catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Base asset, e.g. `BTC`.
    pub base: String,
    /// Quote currency, e.g. `USDT`.
    pub quote: String,
    /// Exchange pair name used on the wire, e.g. `BTCUSDT`.
    pub pair: String,
    /// Human-readable asset name, when the exchange provides one.
    pub name: Option<String>,
}

/// A cryptocurrency resolved from user text against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coin {
    entry: CatalogEntry,
}

impl Coin {
    /// Pick a coin from the catalog rows matching one token.
    ///
    /// Different listings can share a display identity. The catalog keeps
    /// its exchange listing order, so the first row wins and the collision
    /// is logged.
    pub fn from_matches(token: &str, matches: &[CatalogEntry]) -> Option<Coin> {
        if matches.len() > 1 {
            info!(
                token = token,
                listings = matches.len(),
                "crypto with shared display identity, taking the first listing"
            );
        }
        matches.first().map(|entry| Coin {
            entry: entry.clone(),
        })
    }

    /// Upper-case base asset, the form shown to users.
    pub fn display(&self) -> &str {
        &self.entry.base
    }

    /// Pair name sent to the exchange.
    pub fn provider_id(&self) -> &str {
        &self.entry.pair
    }

    /// Long asset name, when known.
    pub fn name(&self) -> Option<&str> {
        self.entry.name.as_deref()
    }
}

/// A symbol resolved from user text.
///
/// The set is closed: additional asset classes extend this enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Coin(Coin),
}

impl Symbol {
    /// Upper-case display form, e.g. `BTC`.
    pub fn display(&self) -> &str {
        match self {
            Symbol::Coin(coin) => coin.display(),
        }
    }

    /// Identifier the data provider expects, e.g. `BTCUSDT`.
    pub fn provider_id(&self) -> &str {
        match self {
            Symbol::Coin(coin) => coin.provider_id(),
        }
    }

    /// Long asset name, when the catalog provides one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Symbol::Coin(coin) => coin.name(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
