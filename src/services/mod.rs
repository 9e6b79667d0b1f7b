pub mod bybit;
pub mod catalog_store;
pub mod extract;
pub mod normalize;

pub use bybit::{BybitClient, HealthCheck, KlineRow, SymbolInfo, Ticker24h};
pub use catalog_store::CatalogStore;
pub use extract::{extract_symbols, resolve_interval};
