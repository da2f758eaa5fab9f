use crate::api::{select_pair, PairPolicy, PairSource};
use crate::chart::generator::Walk;
use crate::chart::interval::Interval;
use crate::error::Result;
use crate::services::PriceOracle;
use async_trait::async_trait;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Lower bound of the synthetic seed price.
pub const SEED_PRICE_BASE: f64 = 0.00001;
/// Width of the synthetic seed price range.
pub const SEED_PRICE_RANGE: f64 = 0.0001;

/// What the generator needs to know about a token right now.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub current_price: f64,
    pub percent_change: Option<f64>,
    pub walk: Walk,
}

#[async_trait]
pub trait PriceSignal: Send + Sync {
    async fn observe(&self, token_mint: &str, interval: Interval) -> Result<Observation>;
}

/// Live price from the oracle, trend from the aggregator's trusted SOL pair.
pub struct AggregatorSignal<S, O> {
    pairs: S,
    oracle: O,
    policy: PairPolicy,
}

impl<S: PairSource, O: PriceOracle> AggregatorSignal<S, O> {
    pub fn new(pairs: S, oracle: O, policy: PairPolicy) -> Self {
        Self {
            pairs,
            oracle,
            policy,
        }
    }
}

#[async_trait]
impl<S: PairSource, O: PriceOracle> PriceSignal for AggregatorSignal<S, O> {
    async fn observe(&self, token_mint: &str, interval: Interval) -> Result<Observation> {
        let pairs = self.pairs.fetch_pairs(token_mint).await?;
        let pair = select_pair(pairs.as_deref(), &self.policy)?;
        let percent_change = pair.price_change_for(interval.signal_window());
        debug!(
            "Using {} pair {} for {}, {} change {:?}",
            pair.dex_id,
            pair.pair_address,
            token_mint,
            interval.signal_window(),
            percent_change
        );

        let current_price = self.oracle.current_price(token_mint).await?;

        Ok(Observation {
            current_price,
            percent_change,
            walk: Walk::TrendAware,
        })
    }
}

/// Signal-free variant: a bounded random seed price and no trend.
pub struct SyntheticSeedSignal {
    rng: Mutex<StdRng>,
}

impl SyntheticSeedSignal {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn seed_price(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        SEED_PRICE_BASE + rng.gen::<f64>() * SEED_PRICE_RANGE
    }
}

impl Default for SyntheticSeedSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceSignal for SyntheticSeedSignal {
    async fn observe(&self, _token_mint: &str, _interval: Interval) -> Result<Observation> {
        Ok(Observation {
            current_price: self.seed_price(),
            percent_change: None,
            walk: Walk::Synthetic,
        })
    }
}
