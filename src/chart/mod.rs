use crate::api::{DexScreenerClient, PairPolicy};
use crate::config::{Config, SignalMode};
use crate::error::Result;
use crate::metrics;
use crate::models::Candle;
use crate::services::PriceServiceClient;
use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

pub mod anchor;
pub mod generator;
pub mod interval;
pub mod signal;

pub use anchor::enforce_anchor;
pub use generator::{generate_series, SeriesParams, Walk};
pub use interval::Interval;
pub use signal::{AggregatorSignal, Observation, PriceSignal, SyntheticSeedSignal};

/// Generates the series for `observation` and pins its last bar to the live price.
pub fn synthesize<R: Rng>(
    observation: &Observation,
    interval: Interval,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<Vec<Candle>> {
    let params = SeriesParams {
        current_price: observation.current_price,
        count: interval.count(),
        duration_ms: interval.duration_ms(),
        percent_change: observation.percent_change,
        walk: observation.walk,
        now,
    };
    let mut candles = generate_series(&params, rng)?;
    enforce_anchor(&mut candles, observation.current_price, now);
    Ok(candles)
}

/// Seed for the synthetic price source, kept apart from the generator seed so
/// the seed price and the walk's start offset come from different draws.
fn signal_seed(seed: u64) -> u64 {
    seed.wrapping_add(1)
}

pub struct ChartService {
    signal: Arc<dyn PriceSignal>,
    rng_seed: Option<u64>,
}

impl ChartService {
    pub fn new(signal: Arc<dyn PriceSignal>) -> Self {
        Self {
            signal,
            rng_seed: None,
        }
    }

    pub fn with_rng_seed(mut self, seed: Option<u64>) -> Self {
        self.rng_seed = seed;
        self
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let signal: Arc<dyn PriceSignal> = match config.chart.signal {
            SignalMode::Aggregator => {
                info!(
                    "Chart anchored to aggregator at {} and price service at {}",
                    config.aggregator.base_url, config.price_service.base_url
                );
                Arc::new(AggregatorSignal::new(
                    DexScreenerClient::from_config(&config.aggregator)?,
                    PriceServiceClient::from_config(&config.price_service)?,
                    PairPolicy::from(&config.aggregator),
                ))
            }
            SignalMode::Synthetic => {
                info!("Chart running on synthetic seed prices");
                match config.chart.rng_seed {
                    Some(seed) => Arc::new(SyntheticSeedSignal::with_seed(signal_seed(seed))),
                    None => Arc::new(SyntheticSeedSignal::new()),
                }
            }
        };
        Ok(Self::new(signal).with_rng_seed(config.chart.rng_seed))
    }

    fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub async fn candles(&self, token_mint: &str, interval_label: &str) -> Result<Vec<Candle>> {
        let interval = Interval::resolve(interval_label);
        let observation = self.signal.observe(token_mint, interval).await?;

        let timer = metrics::GENERATION_LATENCY.start_timer();
        let candles = synthesize(&observation, interval, Utc::now(), &mut self.rng())?;
        timer.observe_duration();

        debug!(
            "Built {} {} candles for {} anchored at {}",
            candles.len(),
            interval,
            token_mint,
            observation.current_price
        );
        Ok(candles)
    }
}
