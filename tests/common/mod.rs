#![allow(dead_code)]

use async_trait::async_trait;
use paper_dashboard::api::{PairPolicy, PairSource};
use paper_dashboard::chart::{AggregatorSignal, ChartService};
use paper_dashboard::error::{Error, Result};
use paper_dashboard::models::{QuoteToken, TradingPair};
use paper_dashboard::services::PriceOracle;
use std::collections::HashMap;
use std::sync::Arc;

pub const TEST_MINT: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";
pub const TEST_PRICE: f64 = 0.0000231;
pub const TEST_SEED: u64 = 42;

/// Aggregator double answering every mint with the same pairs.
pub struct StaticPairSource {
    pub pairs: Option<Vec<TradingPair>>,
}

#[async_trait]
impl PairSource for StaticPairSource {
    async fn fetch_pairs(&self, _token_mint: &str) -> Result<Option<Vec<TradingPair>>> {
        Ok(self.pairs.clone())
    }
}

/// Aggregator double that is always down.
pub struct UnreachablePairSource;

#[async_trait]
impl PairSource for UnreachablePairSource {
    async fn fetch_pairs(&self, _token_mint: &str) -> Result<Option<Vec<TradingPair>>> {
        Err(Error::UpstreamFailure("connection refused".to_string()))
    }
}

/// Price tracker double; `None` means the token is not tracked.
pub struct StaticPriceOracle {
    pub price: Option<f64>,
}

#[async_trait]
impl PriceOracle for StaticPriceOracle {
    async fn current_price(&self, token_mint: &str) -> Result<f64> {
        self.price
            .ok_or_else(|| Error::PriceUnavailable(format!("no price for {}", token_mint)))
    }
}

pub fn create_test_pair(dex: &str, quote: &str, m5: f64, h1: f64) -> TradingPair {
    TradingPair {
        dex_id: dex.to_string(),
        pair_address: format!("{}-{}-pool", dex, quote.to_lowercase()),
        quote_token: QuoteToken {
            address: None,
            symbol: quote.to_string(),
        },
        price_change: HashMap::from([("m5".to_string(), m5), ("h1".to_string(), h1)]),
        price_native: Some(TEST_PRICE.to_string()),
        price_usd: None,
    }
}

pub fn default_pairs() -> Vec<TradingPair> {
    vec![
        create_test_pair("meteora", "SOL", 12.0, 30.0),
        create_test_pair("raydium", "USDC", 1.0, 1.0),
        create_test_pair("raydium", "SOL", 2.0, -6.5),
    ]
}

pub fn create_test_service<S>(pairs: S, price: Option<f64>) -> Arc<ChartService>
where
    S: PairSource + 'static,
{
    let signal = AggregatorSignal::new(pairs, StaticPriceOracle { price }, PairPolicy::default());
    Arc::new(ChartService::new(Arc::new(signal)).with_rng_seed(Some(TEST_SEED)))
}

pub fn create_default_service() -> Arc<ChartService> {
    create_test_service(
        StaticPairSource {
            pairs: Some(default_pairs()),
        },
        Some(TEST_PRICE),
    )
}
