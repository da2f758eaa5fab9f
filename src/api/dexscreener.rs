use crate::api::types::PairsResponse;
use crate::api::PairSource;
use crate::config::AggregatorConfig;
use crate::error::{Error, Result};
use crate::models::TradingPair;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const API_BASE_URL: &str = "https://api.dexscreener.com";

#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    client: Client,
    base_url: String,
}

impl DexScreenerClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AggregatorConfig) -> Result<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }
}

#[async_trait]
impl PairSource for DexScreenerClient {
    async fn fetch_pairs(&self, token_mint: &str) -> Result<Option<Vec<TradingPair>>> {
        let url = format!("{}/latest/dex/tokens/{}", self.base_url, token_mint);
        debug!("Fetching pairs from aggregator: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::UpstreamFailure(format!("aggregator request failed: {}", e)))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => return Ok(None),
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("Aggregator rate limit hit for {}", token_mint);
                return Err(Error::UpstreamFailure("aggregator rate limit exceeded".into()));
            }
            status => {
                return Err(Error::UpstreamFailure(format!(
                    "aggregator returned status {}",
                    status
                )))
            }
        }

        let body: PairsResponse = response
            .json()
            .await
            .map_err(|e| Error::ParseError(format!("invalid aggregator response: {}", e)))?;

        debug!(
            "Aggregator listed {} pairs for {}",
            body.pairs.as_ref().map_or(0, Vec::len),
            token_mint
        );
        Ok(body.pairs)
    }
}
