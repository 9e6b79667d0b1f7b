//! Symbol resolution and market data for a crypto quote bot.
//!
//! Free-form chat text goes in, resolved symbols and normalized market
//! data come out. A lazily refreshed catalog of exchange listings backs
//! symbol resolution; charts and statistics are fetched on demand from
//! the ByBit spot API. A chat front end consumes all of it through
//! [`Router`].

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod router;
pub mod services;

pub use config::Config;
pub use error::{Error, Result};
pub use models::{
    Candle, Catalog, CatalogEntry, Coin, Interval, Series, StatsReply, StatsSnapshot, Symbol,
};
pub use router::Router;
pub use services::resolve_interval;
