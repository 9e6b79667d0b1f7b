//! Token extraction from free-form user text.
//!
//! Messages are scanned for candidate tokens with small regexes and the
//! candidates are resolved against the symbol catalog or the interval
//! token set. Unresolvable tokens are logged and dropped; they never
//! fail the request.

use crate::models::{Catalog, Coin, Interval, Symbol};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::info;

/// Alphabetic runs of 2 to 20 characters. Longer runs split into chunks.
static SYMBOL_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z]{2,20}").unwrap());

/// One or two digits followed by a unit character, e.g. `5m` or `12h`.
static INTERVAL_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{1,2}\w").unwrap());

fn candidate_tokens(regex: &Regex, text: &str) -> HashSet<String> {
    regex
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Resolve every symbol mentioned in the text against the catalog.
///
/// Candidates are deduplicated by exact token, so repeating a mention
/// does not repeat the symbol but differently-cased mentions resolve
/// separately. Tokens that are not in the catalog are logged and
/// dropped. The order of the returned symbols is unspecified.
pub fn extract_symbols(catalog: &Catalog, text: &str) -> Vec<Symbol> {
    let mut symbols = Vec::new();

    for token in candidate_tokens(&SYMBOL_TOKEN, text) {
        let matches = catalog.find_all(&token);
        match Coin::from_matches(&token, &matches) {
            Some(coin) => symbols.push(Symbol::Coin(coin)),
            None => info!(token = %token, "token is not in the symbol catalog"),
        }
    }

    symbols
}

// TODO: lexicographic max ranks "5m" above "30m"; switching to duration
// order changes replies for texts naming several timeframes.
/// Resolve the chart interval mentioned in the text.
///
/// When several candidate tokens appear, the lexicographically greatest
/// one is taken. A candidate outside the interval token set is logged
/// and resolves to nothing.
pub fn resolve_interval(text: &str) -> Option<Interval> {
    let token = candidate_tokens(&INTERVAL_TOKEN, text).into_iter().max()?;

    match Interval::from_token(&token) {
        Some(interval) => Some(interval),
        None => {
            info!(token = %token, "token does not match an expected timeframe");
            None
        }
    }
}
