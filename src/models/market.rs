use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One OHLC bar. `time` serializes as an RFC 3339 string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    /// A flat bar where all four prices are `price`.
    pub fn flat(time: DateTime<Utc>, price: f64) -> Self {
        Self {
            time,
            open: price,
            high: price,
            low: price,
            close: price,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.high >= self.open.max(self.close)
            && self.low <= self.open.min(self.close)
            && self.low > 0.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteToken {
    #[serde(default)]
    pub address: Option<String>,
    pub symbol: String,
}

/// A candidate pair for a token as reported by the market-data aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingPair {
    pub dex_id: String,
    pub pair_address: String,
    pub quote_token: QuoteToken,
    /// Percent change keyed by aggregator window (`m5`, `h1`, `h6`, `h24`).
    #[serde(default)]
    pub price_change: HashMap<String, f64>,
    #[serde(default)]
    pub price_native: Option<String>,
    #[serde(default)]
    pub price_usd: Option<String>,
}

impl TradingPair {
    pub fn quote_symbol(&self) -> &str {
        &self.quote_token.symbol
    }

    pub fn price_change_for(&self, window: &str) -> Option<f64> {
        self.price_change.get(window).copied().filter(|v| v.is_finite())
    }
}
