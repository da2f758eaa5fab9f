use crate::models::Candle;
use chrono::{DateTime, Utc};

/// Replaces the newest bar with a flat bar at the live price so the chart's
/// rightmost point matches the ticker shown elsewhere on the dashboard.
///
/// `now` is the wall clock at response time and is not bucket aligned, so the
/// gap to the previous bar can be shorter than one interval.
pub fn enforce_anchor(candles: &mut [Candle], current_price: f64, now: DateTime<Utc>) {
    if let Some(last) = candles.last_mut() {
        *last = Candle::flat(now, current_price);
    }
}
