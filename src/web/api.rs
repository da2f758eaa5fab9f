use crate::chart::ChartService;
use crate::error::Error;
use crate::metrics;
use crate::web::validation::CandleQuery;
use log::{error, info, warn};
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::{self, Json, WithStatus};

pub fn error_reply(err: &Error) -> WithStatus<Json> {
    reply::with_status(
        reply::json(&serde_json::json!({ "error": err.public_message() })),
        err.status_code(),
    )
}

pub async fn get_candles(
    query: CandleQuery,
    service: Arc<ChartService>,
) -> Result<WithStatus<Json>, Infallible> {
    metrics::CANDLE_REQUESTS.inc();
    let result = match query.token_mint() {
        Ok(mint) => service
            .candles(mint, query.interval_label())
            .await
            .map(|candles| (mint, candles)),
        Err(e) => Err(e),
    };

    match result {
        Ok((mint, candles)) => {
            info!(
                "Served {} candles for {} ({})",
                candles.len(),
                mint,
                query.interval_label()
            );
            Ok(reply::with_status(reply::json(&candles), StatusCode::OK))
        }
        Err(e) => {
            metrics::CANDLE_ERRORS.inc();
            if e.is_expected() {
                warn!("Candle request rejected: {}", e);
            } else {
                error!("Failed to generate candle data: {}", e);
            }
            Ok(error_reply(&e))
        }
    }
}

pub async fn health() -> Result<Json, Infallible> {
    Ok(reply::json(&serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

pub async fn get_metrics() -> Result<WithStatus<String>, Infallible> {
    match metrics::gather() {
        Ok(body) => Ok(reply::with_status(body, StatusCode::OK)),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            Ok(reply::with_status(
                "Failed to get metrics".to_string(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}
