use crate::chart::ChartService;
use crate::error::{Error, Result, MSG_GENERATION_FAILED};
use crate::web::api;
use crate::web::validation::CandleQuery;
use log::info;
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

fn with_service(
    service: Arc<ChartService>,
) -> impl Filter<Extract = (Arc<ChartService>,), Error = Infallible> + Clone {
    warp::any().map(move || service.clone())
}

/// All routes of the chart backend.
pub fn routes(
    service: Arc<ChartService>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let candles = warp::path!("api" / "candles")
        .and(warp::get())
        .and(warp::query::<Vec<(String, String)>>().map(CandleQuery::from_pairs))
        .and(with_service(service))
        .and_then(api::get_candles);

    let health = warp::path!("health").and(warp::get()).and_then(api::health);

    let metrics = warp::path!("metrics").and(warp::get()).and_then(api::get_metrics);

    let cors = warp::cors().allow_any_origin().allow_methods(vec!["GET"]);

    candles
        .or(health)
        .or(metrics)
        .with(cors)
        .with(warp::log("paper_dashboard::web"))
        .recover(handle_rejection)
}

async fn handle_rejection(err: Rejection) -> std::result::Result<impl Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found")
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        // only the candles route reads a query string
        (StatusCode::INTERNAL_SERVER_ERROR, MSG_GENERATION_FAILED)
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else if err.find::<warp::filters::cors::CorsForbidden>().is_some() {
        (StatusCode::FORBIDDEN, "CORS request forbidden")
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({ "error": message })),
        status,
    ))
}

pub struct WebServer {
    service: Arc<ChartService>,
}

impl WebServer {
    pub fn new(service: Arc<ChartService>) -> Self {
        Self { service }
    }

    pub async fn start(&self, host: &str, port: u16) -> Result<()> {
        let ip: IpAddr = host
            .parse()
            .map_err(|_| Error::ConfigError(format!("invalid server host '{}'", host)))?;
        let addr = SocketAddr::new(ip, port);

        info!("Starting web server on {}", addr);
        warp::serve(routes(self.service.clone())).run(addr).await;
        Ok(())
    }
}
