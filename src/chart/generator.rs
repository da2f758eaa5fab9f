use crate::error::{Error, Result};
use crate::models::Candle;
use chrono::{DateTime, Duration, Utc};
use log::debug;
use rand::Rng;

/// Per-step volatility when no percent-change signal is known.
pub const DEFAULT_VOLATILITY: f64 = 0.02;
/// Fraction of the percent-change signal applied per step.
pub const SIGNAL_SCALE: f64 = 0.1;
/// Keeps `1 - volatility` well above zero so closes stay positive.
pub const MAX_VOLATILITY: f64 = 0.5;
/// Share of the gap to the live price closed on each blended step.
pub const BLEND_FACTOR: f64 = 0.1;
/// Bound on the high/low wick jitter.
pub const WICK_JITTER: f64 = 0.01;
/// The synthetic walk starts within this fraction of the seed price.
pub const SYNTHETIC_START_SPREAD: f64 = 0.2;

/// How the walk travels towards the live price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Starts at the live price; blends back towards it over the second half.
    TrendAware,
    /// Starts up to ±20% away and blends towards the seed on every step.
    Synthetic,
}

#[derive(Debug, Clone)]
pub struct SeriesParams {
    pub current_price: f64,
    pub count: usize,
    pub duration_ms: i64,
    pub percent_change: Option<f64>,
    pub walk: Walk,
    pub now: DateTime<Utc>,
}

impl SeriesParams {
    fn validate(&self) -> Result<()> {
        if !self.current_price.is_finite() || self.current_price <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "current price must be positive, got {}",
                self.current_price
            )));
        }
        if self.count < 1 {
            return Err(Error::InvalidInput("candle count must be at least 1".into()));
        }
        if self.duration_ms < 1 {
            return Err(Error::InvalidInput(format!(
                "bucket duration must be positive, got {}ms",
                self.duration_ms
            )));
        }
        Ok(())
    }
}

pub fn volatility(percent_change: Option<f64>) -> f64 {
    match percent_change {
        Some(pct) if pct.is_finite() && pct != 0.0 => {
            (pct.abs() / 100.0 * SIGNAL_SCALE).min(MAX_VOLATILITY)
        }
        _ => DEFAULT_VOLATILITY,
    }
}

/// Generates `count` bars, oldest first, ending at `now`.
pub fn generate_series<R: Rng>(params: &SeriesParams, rng: &mut R) -> Result<Vec<Candle>> {
    params.validate()?;

    let volatility = volatility(params.percent_change);
    let current = params.current_price;
    let count = params.count;

    let mut last_price = match params.walk {
        Walk::TrendAware => current,
        Walk::Synthetic => {
            let offset = rng.gen::<f64>() * 2.0 * SYNTHETIC_START_SPREAD - SYNTHETIC_START_SPREAD;
            current * (1.0 + offset)
        }
    };

    debug!(
        "Generating {} candles ({}ms buckets), volatility {:.5}, walk {:?}",
        count, params.duration_ms, volatility, params.walk
    );

    let mut candles = Vec::with_capacity(count);
    for i in 0..count {
        let steps_back = (count - 1 - i) as i64;
        let time = params.now - Duration::milliseconds(steps_back * params.duration_ms);

        let open = last_price;
        let blend = match params.walk {
            Walk::TrendAware => i >= count / 2,
            Walk::Synthetic => true,
        };
        let target = if blend {
            open + (current - open) * BLEND_FACTOR
        } else {
            open
        };

        let perturbation = (rng.gen::<f64>() * 2.0 - 1.0) * volatility;
        let close = target * (1.0 + perturbation);
        let high = open.max(close) * (1.0 + rng.gen::<f64>() * WICK_JITTER);
        let low = open.min(close) * (1.0 - rng.gen::<f64>() * WICK_JITTER);

        candles.push(Candle {
            time,
            open,
            high,
            low,
            close,
        });
        last_price = close;
    }

    Ok(candles)
}
