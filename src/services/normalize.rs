//! Normalization of raw exchange payloads into chart and stats models.

use crate::constants::{kline_column, MAX_SERIES_CANDLES};
use crate::models::{Candle, Interval, Series, StatsSnapshot};
use crate::services::bybit::{KlineRow, Ticker24h};
use chrono::DateTime;
use serde_json::Value;
use tracing::debug;

/// Build a chart series from raw kline rows.
///
/// Rows are sorted into ascending time order, duplicate timestamps are
/// collapsed to their first row, and only the newest
/// [`MAX_SERIES_CANDLES`] candles are kept. Malformed rows are logged
/// and skipped.
pub fn series_from_klines(symbol: &str, interval: Interval, rows: &[KlineRow]) -> Series {
    let mut candles = Vec::with_capacity(rows.len());

    for row in rows {
        match candle_from_row(row) {
            Some(candle) => candles.push(candle),
            None => debug!(symbol = symbol, "skipping malformed kline row"),
        }
    }

    candles.sort_by_key(|candle| candle.time);
    candles.dedup_by_key(|candle| candle.time);

    if candles.len() > MAX_SERIES_CANDLES {
        let excess = candles.len() - MAX_SERIES_CANDLES;
        candles.drain(..excess);
    }

    Series {
        symbol: symbol.to_string(),
        interval,
        candles,
    }
}

/// Close of the most recent completed candle.
///
/// The final candle of a series is the in-progress bucket, so the
/// second-to-last close is the reference. Needs at least two candles.
pub fn completed_close(series: &Series) -> Option<f64> {
    if series.candles.len() < 2 {
        return None;
    }
    Some(series.candles[series.candles.len() - 2].close)
}

/// Build a stats snapshot from a 24-hour ticker.
///
/// All four prices must parse and the open must be non-zero, otherwise
/// no snapshot is produced. The hourly change is only computed when a
/// non-zero reference close is supplied.
pub fn snapshot_from_ticker(
    symbol: &str,
    ticker: &Ticker24h,
    hourly_reference: Option<f64>,
) -> Option<StatsSnapshot> {
    let last = price_f64(ticker.last_price.as_deref())?;
    let open = price_f64(ticker.open_price.as_deref())?;
    let high = price_f64(ticker.high_price.as_deref())?;
    let low = price_f64(ticker.low_price.as_deref())?;

    if open == 0.0 {
        return None;
    }

    let change_24h = (last / open - 1.0) * 100.0;
    let change_1h = hourly_reference
        .filter(|reference| *reference != 0.0)
        .map(|reference| (last / reference - 1.0) * 100.0);

    Some(StatsSnapshot {
        symbol: symbol.to_string(),
        last,
        open,
        high,
        low,
        change_1h,
        change_24h,
    })
}

fn candle_from_row(row: &KlineRow) -> Option<Candle> {
    let start_ms = value_i64(row.get(kline_column::START_TIME)?)?;
    let time = DateTime::from_timestamp_millis(start_ms)?;

    Some(Candle {
        time,
        open: value_f64(row.get(kline_column::OPEN)?)?,
        high: value_f64(row.get(kline_column::HIGH)?)?,
        low: value_f64(row.get(kline_column::LOW)?)?,
        close: value_f64(row.get(kline_column::CLOSE)?)?,
        volume: row.get(kline_column::VOLUME).and_then(value_f64),
    })
}

/// Numeric value that may arrive as a JSON number or a decimal string.
fn value_f64(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

fn value_i64(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

fn price_f64(price: Option<&str>) -> Option<f64> {
    price.and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE_MS: i64 = 1_620_775_800_000;

    fn row(start_ms: i64, close: &str) -> KlineRow {
        vec![
            json!(start_ms),
            json!("1.0"),
            json!("2.0"),
            json!("0.5"),
            json!(close),
            json!("10.0"),
            json!(start_ms + 59_999),
            json!("100.0"),
            json!(5),
            json!("4.0"),
            json!("40.0"),
        ]
    }

    fn minute(offset: i64) -> i64 {
        BASE_MS + offset * 60_000
    }

    #[test]
    fn test_series_sorts_ascending() {
        let rows = vec![
            row(minute(2), "3.0"),
            row(minute(0), "1.0"),
            row(minute(1), "2.0"),
        ];

        let series = series_from_klines("BTC", Interval::Minute1, &rows);
        assert_eq!(series.len(), 3);
        let closes: Vec<f64> = series.candles.iter().map(|c| c.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0]);
        assert!(series.candles.windows(2).all(|w| w[0].time < w[1].time));
    }

    #[test]
    fn test_series_keeps_only_the_newest_candles() {
        let rows: Vec<KlineRow> = (0..150).rev().map(|i| row(minute(i), "1.0")).collect();

        let series = series_from_klines("BTC", Interval::Minute1, &rows);
        assert_eq!(series.len(), MAX_SERIES_CANDLES);
        assert_eq!(
            series.candles[0].time,
            DateTime::from_timestamp_millis(minute(50)).unwrap()
        );
    }

    #[test]
    fn test_series_collapses_duplicate_timestamps() {
        let rows = vec![row(minute(0), "1.0"), row(minute(0), "9.0")];

        let series = series_from_klines("BTC", Interval::Minute1, &rows);
        assert_eq!(series.len(), 1);
        assert_eq!(series.candles[0].close, 1.0);
    }

    #[test]
    fn test_series_skips_malformed_rows() {
        let mut bad_close = row(minute(1), "1.0");
        bad_close[kline_column::CLOSE] = json!("not-a-price");
        let short_row: KlineRow = vec![json!(minute(2)), json!("1.0")];
        let rows = vec![row(minute(0), "1.0"), bad_close, short_row];

        let series = series_from_klines("BTC", Interval::Minute1, &rows);
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_series_from_no_rows_is_empty() {
        let series = series_from_klines("BTC", Interval::Day1, &[]);
        assert!(series.is_empty());
        assert_eq!(series.symbol, "BTC");
    }

    #[test]
    fn test_candle_accepts_string_timestamps() {
        let mut string_time = row(minute(0), "1.0");
        string_time[kline_column::START_TIME] = json!(minute(0).to_string());
        string_time[kline_column::VOLUME] = json!("12.5");

        let series = series_from_klines("BTC", Interval::Minute1, &[string_time]);
        assert_eq!(series.len(), 1);
        assert_eq!(series.candles[0].volume, Some(12.5));
    }

    #[test]
    fn test_completed_close_is_second_to_last() {
        let rows = vec![
            row(minute(0), "1.0"),
            row(minute(1), "2.0"),
            row(minute(2), "3.0"),
        ];
        let series = series_from_klines("BTC", Interval::Hour1, &rows);
        assert_eq!(completed_close(&series), Some(2.0));
    }

    #[test]
    fn test_completed_close_needs_two_candles() {
        let one = series_from_klines("BTC", Interval::Hour1, &[row(minute(0), "1.0")]);
        assert_eq!(completed_close(&one), None);

        let none = series_from_klines("BTC", Interval::Hour1, &[]);
        assert_eq!(completed_close(&none), None);
    }

    #[test]
    fn test_snapshot_change_math() {
        let ticker = Ticker24h {
            last_price: Some("105.0".to_string()),
            open_price: Some("100.0".to_string()),
            high_price: Some("110.0".to_string()),
            low_price: Some("95.0".to_string()),
            ..Ticker24h::default()
        };

        let snapshot = snapshot_from_ticker("BTC", &ticker, Some(104.0)).unwrap();
        assert!((snapshot.change_24h - 5.0).abs() < 1e-9);
        let change_1h = snapshot.change_1h.unwrap();
        assert!((change_1h - (105.0 / 104.0 - 1.0) * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_without_hourly_reference() {
        let ticker = Ticker24h {
            last_price: Some("105.0".to_string()),
            open_price: Some("100.0".to_string()),
            high_price: Some("110.0".to_string()),
            low_price: Some("95.0".to_string()),
            ..Ticker24h::default()
        };

        let snapshot = snapshot_from_ticker("BTC", &ticker, None).unwrap();
        assert_eq!(snapshot.change_1h, None);
    }

    #[test]
    fn test_snapshot_requires_usable_prices() {
        assert!(snapshot_from_ticker("BTC", &Ticker24h::default(), None).is_none());

        let zero_open = Ticker24h {
            last_price: Some("105.0".to_string()),
            open_price: Some("0".to_string()),
            high_price: Some("110.0".to_string()),
            low_price: Some("95.0".to_string()),
            ..Ticker24h::default()
        };
        assert!(snapshot_from_ticker("BTC", &zero_open, None).is_none());

        let bad_last = Ticker24h {
            last_price: Some("abc".to_string()),
            open_price: Some("100.0".to_string()),
            high_price: Some("110.0".to_string()),
            low_price: Some("95.0".to_string()),
            ..Ticker24h::default()
        };
        assert!(snapshot_from_ticker("BTC", &bad_last, None).is_none());
    }
}
