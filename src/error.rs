use thiserror::Error as ThisError;

/// Errors surfaced by the market data layer.
///
/// Only failures of the process itself are errors: a bad configuration, an
/// exchange that cannot be reached, or a payload that cannot be decoded.
/// An exchange that answers "no data for this symbol" is a normal outcome
/// and is reported through empty values, never through this enum.
#[derive(ThisError, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Upstream(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
