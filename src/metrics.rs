use lazy_static::lazy_static;
use prometheus::{Counter, Encoder, Histogram, Registry, TextEncoder};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    pub static ref CANDLE_REQUESTS: Counter = Counter::new(
        "candle_requests_total",
        "Total number of candle series requests"
    ).unwrap();

    pub static ref CANDLE_ERRORS: Counter = Counter::new(
        "candle_errors_total",
        "Total number of failed candle series requests"
    ).unwrap();

    pub static ref GENERATION_LATENCY: Histogram = Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "candle_generation_seconds",
            "Time spent generating a candle series"
        ).buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01])
    ).unwrap();
}

pub fn init() -> Result<(), prometheus::Error> {
    REGISTRY.register(Box::new(CANDLE_REQUESTS.clone()))?;
    REGISTRY.register(Box::new(CANDLE_ERRORS.clone()))?;
    REGISTRY.register(Box::new(GENERATION_LATENCY.clone()))?;
    Ok(())
}

/// Text exposition of everything registered in [`REGISTRY`].
pub fn gather() -> Result<String, prometheus::Error> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&REGISTRY.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
