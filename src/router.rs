//! Entry point tying symbol resolution to market data fetches.

use crate::config::Config;
use crate::error::Result;
use crate::models::{Interval, Series, StatsReply, Symbol};
use crate::services::bybit::BybitClient;
use crate::services::catalog_store::CatalogStore;
use crate::services::{extract, normalize};
use std::sync::Arc;
use tracing::{info, warn};

/// Facade over the symbol catalog, token extraction, and market data
/// fetches.
///
/// Every operation degrades to an empty or explanatory value instead of
/// failing, so a chat front end consuming this type never has to handle
/// an error mid-conversation.
pub struct Router {
    client: Arc<BybitClient>,
    catalog: CatalogStore,
}

impl Router {
    /// Build a router from configuration. No network traffic happens
    /// here; the catalog is populated on first use.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Arc::new(BybitClient::new(config)?);
        let catalog = CatalogStore::new(client.clone(), config.quote_currency.clone());
        Ok(Self { client, catalog })
    }

    /// Resolve every symbol mentioned in the text.
    ///
    /// Refreshes the catalog first when it is stale. A failed refresh is
    /// absorbed and resolution runs against the previous snapshot.
    pub async fn find_symbols(&self, text: &str) -> Vec<Symbol> {
        self.catalog.ensure_fresh().await;
        let catalog = self.catalog.snapshot().await;
        let symbols = extract::extract_symbols(&catalog, text);

        if !symbols.is_empty() {
            let displays: Vec<&str> = symbols.iter().map(|s| s.display()).collect();
            info!(symbols = ?displays, "resolved symbols");
        }

        symbols
    }

    /// Chart series for one symbol. An unreachable exchange yields an
    /// empty series.
    pub async fn chart_series(&self, symbol: &Symbol, interval: Interval) -> Series {
        match self.client.get_klines(symbol.provider_id(), interval).await {
            Ok(rows) => normalize::series_from_klines(symbol.display(), interval, &rows),
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "kline fetch failed, returning an empty series");
                Series::empty(symbol.display().to_string(), interval)
            }
        }
    }

    /// 24-hour statistics for each requested symbol.
    ///
    /// Symbols the exchange has no data for yield an [`StatsReply::Unavailable`]
    /// notice; symbol kinds without statistics support are skipped
    /// entirely, so replies cannot be paired with the input by position.
    pub async fn statistics(&self, symbols: &[Symbol]) -> Vec<StatsReply> {
        let mut replies = Vec::with_capacity(symbols.len());

        for symbol in symbols {
            match symbol {
                Symbol::Coin(_) => replies.push(self.coin_stats(symbol).await),
            }
        }

        replies
    }

    /// Status report covering the caller's own note and the exchange
    /// connection. Never fails; an unreachable exchange becomes a line in
    /// the report. The report is also logged at warning level.
    pub async fn status(&self, caller_note: &str) -> String {
        let exchange_line = match self.client.health_check().await {
            Ok(health) if health.ok => format!(
                "ByBit API responded that it was OK with a {} in {:.2} Seconds.",
                health.status, health.elapsed_seconds
            ),
            Ok(health) => format!(
                "ByBit API returned an error code {} in {:.2} Seconds.",
                health.status, health.elapsed_seconds
            ),
            Err(e) => format!("ByBit API could not be reached: {}.", e),
        };

        let report = format!(
            "Bot Status:\n{}\n\nCryptocurrency Data:\n{}",
            caller_note, exchange_line
        );
        warn!("{}", report);
        report
    }

    async fn coin_stats(&self, symbol: &Symbol) -> StatsReply {
        let ticker = match self.client.get_ticker_24h(symbol.provider_id()).await {
            Ok(Some(ticker)) => ticker,
            Ok(None) => return unavailable(symbol),
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "ticker fetch failed");
                return unavailable(symbol);
            }
        };

        let hourly_reference = match self
            .client
            .get_klines(symbol.provider_id(), Interval::Hour1)
            .await
        {
            Ok(rows) => {
                let series =
                    normalize::series_from_klines(symbol.display(), Interval::Hour1, &rows);
                normalize::completed_close(&series)
            }
            Err(e) => {
                info!(symbol = %symbol, error = %e, "hourly candles unavailable for the 1h change");
                None
            }
        };

        match normalize::snapshot_from_ticker(symbol.display(), &ticker, hourly_reference) {
            Some(snapshot) => StatsReply::Snapshot(snapshot),
            None => unavailable(symbol),
        }
    }
}

fn unavailable(symbol: &Symbol) -> StatsReply {
    StatsReply::Unavailable(format!(
        "The price for {} is not available. If you suspect this is an error run `/status`",
        symbol.display()
    ))
}
