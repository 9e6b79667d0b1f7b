//! REST client for the ByBit spot v1 API.
//!
//! Four public endpoints are used: the symbol listing, klines, the
//! 24-hour ticker, and server time for health probes. Every response
//! arrives in an envelope carrying `ret_code`; a non-zero code on a data
//! endpoint means "no data for this symbol" and is not treated as a
//! failure.

use crate::config::Config;
use crate::constants::{HEALTH_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS};
use crate::error::{Error, Result};
use crate::models::Interval;
use serde::Deserialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::info;

/// One row of the symbol listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    /// Pair name used on the wire, e.g. `BTCUSDT`.
    pub name: String,
    /// Display alias, usually identical to `name`.
    pub alias: Option<String>,
    pub base_currency: String,
    pub quote_currency: String,
}

/// 24-hour ticker for one pair. Prices arrive as decimal strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker24h {
    pub symbol: Option<String>,
    pub best_bid_price: Option<String>,
    pub best_ask_price: Option<String>,
    pub last_price: Option<String>,
    pub open_price: Option<String>,
    pub high_price: Option<String>,
    pub low_price: Option<String>,
    pub volume: Option<String>,
    pub quote_volume: Option<String>,
    pub time: Option<i64>,
}

/// One kline row: a JSON array mixing integer timestamps and string
/// prices. See [`crate::constants::kline_column`] for the layout.
pub type KlineRow = Vec<Value>;

/// Result of probing the exchange server-time endpoint.
#[derive(Debug, Clone)]
pub struct HealthCheck {
    /// Whether the exchange answered with a 2xx status.
    pub ok: bool,
    /// HTTP status code of the answer.
    pub status: u16,
    /// Round-trip time in seconds.
    pub elapsed_seconds: f64,
}

/// Response envelope shared by every v1 endpoint.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    ret_code: i64,
    ret_msg: Option<String>,
    result: Option<T>,
}

/// HTTP client for the exchange.
///
/// Credentials are held for signed endpoints; none of the market data
/// operations below need them.
pub struct BybitClient {
    client: reqwest::Client,
    base_url: String,
    #[allow(dead_code)]
    api_key: String,
    #[allow(dead_code)]
    api_secret: String,
}

impl BybitClient {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "Invalid base_url: must start with http:// or https://, got: '{}'",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        })
    }

    /// Fetch the full spot symbol listing.
    ///
    /// A non-zero `ret_code` here is a failure: the catalog must never be
    /// rebuilt from a partial listing.
    pub async fn list_symbols(&self) -> Result<Vec<SymbolInfo>> {
        let url = format!("{}/spot/v1/symbols", self.base_url);
        let body = self.get_text(&url).await?;
        parse_symbols_response(&body)
    }

    /// Fetch candles for one pair and interval, newest first as the
    /// exchange sends them.
    pub async fn get_klines(&self, pair: &str, interval: Interval) -> Result<Vec<KlineRow>> {
        let url = format!(
            "{}/spot/quote/v1/kline?symbol={}&interval={}",
            self.base_url,
            pair,
            interval.as_str()
        );
        let body = self.get_text(&url).await?;
        parse_kline_response(pair, &body)
    }

    /// Fetch the 24-hour ticker for one pair. `None` means the exchange
    /// has no data for it.
    pub async fn get_ticker_24h(&self, pair: &str) -> Result<Option<Ticker24h>> {
        let url = format!("{}/spot/quote/v1/ticker/24hr?symbol={}", self.base_url, pair);
        let body = self.get_text(&url).await?;
        parse_ticker_response(pair, &body)
    }

    /// Probe the server-time endpoint and report how the exchange answered.
    ///
    /// A non-2xx answer is still an `Ok` result; only a transport failure
    /// is an error.
    pub async fn health_check(&self) -> Result<HealthCheck> {
        let url = format!("{}/spot/v1/time", self.base_url);
        let started = Instant::now();
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(HEALTH_TIMEOUT_SECS))
            .send()
            .await?;

        Ok(HealthCheck {
            ok: response.status().is_success(),
            status: response.status().as_u16(),
            elapsed_seconds: started.elapsed().as_secs_f64(),
        })
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Upstream(format!(
                "exchange returned status {} for {}",
                response.status(),
                url
            )));
        }

        Ok(response.text().await?)
    }
}

fn parse_symbols_response(body: &str) -> Result<Vec<SymbolInfo>> {
    let envelope: Envelope<Vec<SymbolInfo>> = serde_json::from_str(body)?;

    if envelope.ret_code != 0 {
        return Err(Error::Upstream(format!(
            "symbol listing failed with code {}: {}",
            envelope.ret_code,
            envelope.ret_msg.unwrap_or_default()
        )));
    }

    Ok(envelope.result.unwrap_or_default())
}

fn parse_kline_response(pair: &str, body: &str) -> Result<Vec<KlineRow>> {
    let envelope: Envelope<Vec<KlineRow>> = serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("bad kline payload for {}: {}", pair, e)))?;

    if envelope.ret_code != 0 {
        info!(
            pair = pair,
            code = envelope.ret_code,
            "exchange returned no kline data"
        );
        return Ok(Vec::new());
    }

    Ok(envelope.result.unwrap_or_default())
}

fn parse_ticker_response(pair: &str, body: &str) -> Result<Option<Ticker24h>> {
    let envelope: Envelope<Ticker24h> = serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("bad ticker payload for {}: {}", pair, e)))?;

    if envelope.ret_code != 0 {
        info!(
            pair = pair,
            code = envelope.ret_code,
            "exchange returned no ticker data"
        );
        return Ok(None);
    }

    Ok(envelope.result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::kline_column;
    use serde_json::json;

    const SYMBOLS_BODY: &str = r#"{
        "ret_code": 0,
        "ret_msg": "",
        "ext_code": null,
        "ext_info": null,
        "result": [
            {
                "name": "BTCUSDT",
                "alias": "BTCUSDT",
                "baseCurrency": "BTC",
                "quoteCurrency": "USDT",
                "basePrecision": "0.000001",
                "quotePrecision": "0.01",
                "minTradeQuantity": "0.00004",
                "minTradeAmount": "1",
                "minPricePrecision": "0.01",
                "maxTradeQuantity": "46.13",
                "maxTradeAmount": "920000",
                "category": 1
            },
            {
                "name": "ETHUSDC",
                "alias": "ETHUSDC",
                "baseCurrency": "ETH",
                "quoteCurrency": "USDC",
                "basePrecision": "0.00001",
                "quotePrecision": "0.01",
                "minTradeQuantity": "0.0005",
                "minTradeAmount": "1",
                "minPricePrecision": "0.01",
                "maxTradeQuantity": "630",
                "maxTradeAmount": "1260000",
                "category": 1
            }
        ]
    }"#;

    #[test]
    fn test_parse_symbol_listing() {
        let symbols = parse_symbols_response(SYMBOLS_BODY).unwrap();
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[0].name, "BTCUSDT");
        assert_eq!(symbols[0].base_currency, "BTC");
        assert_eq!(symbols[1].quote_currency, "USDC");
    }

    #[test]
    fn test_symbol_listing_error_code_fails() {
        let body = r#"{"ret_code": 10001, "ret_msg": "system maintenance", "result": null}"#;
        let err = parse_symbols_response(body).unwrap_err();
        assert!(err.to_string().contains("system maintenance"));
    }

    #[test]
    fn test_parse_kline_rows() {
        let body = r#"{
            "ret_code": 0,
            "ret_msg": null,
            "ext_code": null,
            "ext_info": null,
            "result": [
                [1620775800000, "49418.05", "49418.05", "49319.34", "49378.41",
                 "2.334905", 1620775859999, "115299.1022", 154, "0.98549", "48681.21"]
            ]
        }"#;

        let rows = parse_kline_response("BTCUSDT", body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][kline_column::START_TIME], json!(1620775800000i64));
        assert_eq!(rows[0][kline_column::CLOSE], json!("49378.41"));
        assert_eq!(rows[0][kline_column::TRADES], json!(154));
    }

    #[test]
    fn test_kline_error_code_means_no_data() {
        let body = r#"{"ret_code": -100011, "ret_msg": "Not supported symbols", "result": null}"#;
        let rows = parse_kline_response("TSLAUSDT", body).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_ticker() {
        let body = r#"{
            "ret_code": 0,
            "ret_msg": null,
            "result": {
                "time": 1620783129075,
                "symbol": "BTCUSDT",
                "bestBidPrice": "49608.5",
                "bestAskPrice": "49608.99",
                "volume": "11790.749",
                "quoteVolume": "589454570.8",
                "lastPrice": "49608.99",
                "highPrice": "50500",
                "lowPrice": "48655.99",
                "openPrice": "49027.1"
            }
        }"#;

        let ticker = parse_ticker_response("BTCUSDT", body).unwrap().unwrap();
        assert_eq!(ticker.last_price.as_deref(), Some("49608.99"));
        assert_eq!(ticker.open_price.as_deref(), Some("49027.1"));
        assert_eq!(ticker.time, Some(1620783129075));
    }

    #[test]
    fn test_ticker_error_code_means_no_data() {
        let body = r#"{"ret_code": -100011, "ret_msg": "Not supported symbols", "result": null}"#;
        let ticker = parse_ticker_response("TSLAUSDT", body).unwrap();
        assert!(ticker.is_none());
    }

    #[test]
    fn test_rejects_base_url_without_scheme() {
        let config = Config {
            base_url: "api.bybit.com".to_string(),
            ..Config::default()
        };
        assert!(matches!(BybitClient::new(&config), Err(Error::Config(_))));
    }

    #[tokio::test]
    #[ignore] // hits the live exchange
    async fn test_live_symbol_listing() {
        let client = BybitClient::new(&Config::default()).unwrap();
        let symbols = client.list_symbols().await.unwrap();
        assert!(!symbols.is_empty());
    }
}
