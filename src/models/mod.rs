pub mod market;

pub use market::{Candle, QuoteToken, TradingPair};
