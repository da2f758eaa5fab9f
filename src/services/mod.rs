use crate::error::Result;
use async_trait::async_trait;

pub mod price_service;

pub use price_service::PriceServiceClient;

/// Source of the authoritative spot price for a token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceOracle: Send + Sync {
    async fn current_price(&self, token_mint: &str) -> Result<f64>;
}
