//! Shared symbol catalog with lazy daily refresh.

use crate::error::Result;
use crate::models::{Catalog, CatalogEntry};
use crate::services::bybit::{BybitClient, SymbolInfo};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Holds the current catalog snapshot and rebuilds it when stale.
///
/// A replacement snapshot is built in full before the write lock is
/// taken, so the lock is only held for the pointer swap and readers are
/// never blocked behind a network call. When a rebuild fails the
/// previous snapshot stays in place and the next request tries again.
pub struct CatalogStore {
    client: Arc<BybitClient>,
    quote_currency: String,
    catalog: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    /// Create a store with an empty catalog. The first call to
    /// [`CatalogStore::ensure_fresh`] populates it.
    pub fn new(client: Arc<BybitClient>, quote_currency: String) -> Self {
        let catalog = Catalog::empty(quote_currency.clone());
        Self {
            client,
            quote_currency,
            catalog: RwLock::new(Arc::new(catalog)),
        }
    }

    /// Current catalog snapshot.
    pub async fn snapshot(&self) -> Arc<Catalog> {
        self.catalog.read().await.clone()
    }

    /// First catalog entry matching the token, case-insensitively.
    pub async fn lookup(&self, token: &str) -> Option<CatalogEntry> {
        self.snapshot().await.lookup(token).cloned()
    }

    /// Rebuild the catalog if the current snapshot is stale.
    ///
    /// A failed rebuild is absorbed: the store keeps serving the previous
    /// snapshot and stays due for refresh.
    pub async fn ensure_fresh(&self) {
        if !self.snapshot().await.refresh_due(Utc::now()) {
            return;
        }

        if let Err(e) = self.refresh().await {
            warn!(error = %e, "catalog refresh failed, serving the previous snapshot");
        }
    }

    /// Fetch the symbol listing and swap in a new catalog snapshot.
    pub async fn refresh(&self) -> Result<()> {
        let symbols = self.client.list_symbols().await?;
        let entries = filter_entries(symbols, &self.quote_currency);
        let catalog = Arc::new(Catalog::new(
            entries,
            self.quote_currency.clone(),
            Utc::now(),
        ));

        info!(
            symbols = catalog.len(),
            quote_currency = %self.quote_currency,
            "catalog refreshed"
        );

        *self.catalog.write().await = catalog;
        Ok(())
    }
}

/// Keep listings in the configured quote currency, dropping duplicate
/// pairs. Listing order is preserved and the first occurrence of a pair
/// wins.
fn filter_entries(symbols: Vec<SymbolInfo>, quote_currency: &str) -> Vec<CatalogEntry> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut entries = Vec::new();

    for info in symbols {
        if info.quote_currency != quote_currency {
            continue;
        }
        if !seen.insert((info.base_currency.clone(), info.quote_currency.clone())) {
            debug!(pair = %info.name, "duplicate listing dropped");
            continue;
        }
        entries.push(CatalogEntry {
            base: info.base_currency,
            quote: info.quote_currency,
            pair: info.name,
            name: None,
        });
    }

    entries
}
