mod candle;
mod catalog;
mod interval;
mod stats;
mod symbol;

pub use candle::{Candle, Series};
pub use catalog::Catalog;
pub use interval::Interval;
pub use stats::{StatsReply, StatsSnapshot};
pub use symbol::{CatalogEntry, Coin, Symbol};
