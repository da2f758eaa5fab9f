use crate::error::Result;
use crate::models::TradingPair;
use async_trait::async_trait;

pub mod dexscreener;
pub mod pair_resolver;
pub mod types;

pub use dexscreener::DexScreenerClient;
pub use pair_resolver::{select_pair, PairPolicy};

/// Market-data aggregator listing candidate pairs for a token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PairSource: Send + Sync {
    /// `None` when the aggregator knows no pairs for the mint.
    async fn fetch_pairs(&self, token_mint: &str) -> Result<Option<Vec<TradingPair>>>;
}
