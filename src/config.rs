use tracing::warn;

/// Runtime configuration, read from the process environment.
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | `BYBIT_API_KEY` | empty | Exchange API key, reserved for signed endpoints |
/// | `BYBIT_API_SECRET` | empty | Exchange API secret, reserved for signed endpoints |
/// | `BYBIT_BASE_URL` | `https://api.bybit.com` | Exchange REST base URL |
/// | `BYBIT_QUOTE_CURRENCY` | `USDT` | Quote currency the symbol catalog is restricted to |
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_secret: String,
    pub base_url: String,
    pub quote_currency: String,
}

impl Config {
    /// Build a configuration from environment variables.
    ///
    /// Missing credentials are allowed; every operation this crate exposes
    /// uses public endpoints. A warning is logged so operators notice before
    /// they need a signed call.
    pub fn from_env() -> Self {
        let config = Self {
            api_key: env_str("BYBIT_API_KEY", ""),
            api_secret: env_str("BYBIT_API_SECRET", ""),
            base_url: env_str("BYBIT_BASE_URL", "https://api.bybit.com"),
            quote_currency: env_str("BYBIT_QUOTE_CURRENCY", "USDT"),
        };

        if config.api_key.is_empty() || config.api_secret.is_empty() {
            warn!("starting without exchange credentials, signed endpoints will be unavailable");
        }

        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            base_url: "https://api.bybit.com".to_string(),
            quote_currency: "USDT".to_string(),
        }
    }
}

/// Read an environment variable, falling back to a default when it is unset
/// or empty.
fn env_str(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => default.to_string(),
    }
}
