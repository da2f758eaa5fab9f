use crate::config::PriceServiceConfig;
use crate::error::{Error, Result};
use crate::services::PriceOracle;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct PriceResponse {
    #[serde(default)]
    price: Option<f64>,
}

/// Client for the bot's internal price-tracking service.
#[derive(Debug, Clone)]
pub struct PriceServiceClient {
    client: Client,
    base_url: String,
}

impl PriceServiceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &PriceServiceConfig) -> Result<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }
}

#[async_trait]
impl PriceOracle for PriceServiceClient {
    async fn current_price(&self, token_mint: &str) -> Result<f64> {
        let url = format!("{}/prices/{}", self.base_url, token_mint);
        debug!("Requesting current price: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::UpstreamFailure(format!("price service request failed: {}", e)))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => {
                return Err(Error::PriceUnavailable(format!(
                    "price service has no entry for {}",
                    token_mint
                )))
            }
            status => {
                warn!("Price service answered {} for {}", status, token_mint);
                return Err(Error::UpstreamFailure(format!(
                    "price service returned status {}",
                    status
                )));
            }
        }

        let body: PriceResponse = response
            .json()
            .await
            .map_err(|e| Error::ParseError(format!("invalid price service response: {}", e)))?;

        match body.price {
            Some(price) if price.is_finite() && price > 0.0 => Ok(price),
            Some(price) => Err(Error::PriceUnavailable(format!(
                "unusable price {} for {}",
                price, token_mint
            ))),
            None => Err(Error::PriceUnavailable(format!("no price tracked for {}", token_mint))),
        }
    }
}
