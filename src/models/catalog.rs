use crate::constants::CATALOG_REFRESH_SECONDS;
use crate::models::CatalogEntry;
use chrono::{DateTime, Duration, Utc};

/// Immutable snapshot of the exchange symbol catalog.
///
/// A snapshot is built in full and then swapped into place, so readers
/// always see a consistent listing. Entries keep the exchange's listing
/// order.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    quote_currency: String,
    refreshed_at: DateTime<Utc>,
}

impl Catalog {
    pub fn new(
        entries: Vec<CatalogEntry>,
        quote_currency: String,
        refreshed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            entries,
            quote_currency,
            refreshed_at,
        }
    }

    /// Catalog with no entries, timestamped at the epoch so the first
    /// lookup finds it due for refresh.
    pub fn empty(quote_currency: String) -> Self {
        Self {
            entries: Vec::new(),
            quote_currency,
            refreshed_at: DateTime::UNIX_EPOCH,
        }
    }

    /// All entries whose base asset matches the token, case-insensitively.
    ///
    /// The token must match the whole base asset: `btc` finds `BTC`,
    /// `bt` finds nothing.
    pub fn find_all(&self, token: &str) -> Vec<CatalogEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.base.eq_ignore_ascii_case(token))
            .cloned()
            .collect()
    }

    /// First entry whose base asset matches the token, case-insensitively.
    pub fn lookup(&self, token: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|entry| entry.base.eq_ignore_ascii_case(token))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn quote_currency(&self) -> &str {
        &self.quote_currency
    }

    pub fn refreshed_at(&self) -> DateTime<Utc> {
        self.refreshed_at
    }

    /// Whether this snapshot is old enough to rebuild.
    pub fn refresh_due(&self, now: DateTime<Utc>) -> bool {
        now - self.refreshed_at >= Duration::seconds(CATALOG_REFRESH_SECONDS)
    }
}
