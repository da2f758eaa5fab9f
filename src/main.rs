use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::sync::Arc;

use paper_dashboard::chart::ChartService;
use paper_dashboard::cli::Cli;
use paper_dashboard::config::Config;
use paper_dashboard::web::WebServer;
use paper_dashboard::{logging, metrics};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(|| "config/config.toml".into());
    let mut config = Config::load_or_default(&config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;
    config.apply_env_overrides()?;
    cli.apply(&mut config);
    config.validate()?;

    logging::init(&config.logging)?;
    info!("Configuration loaded, chart signal: {:?}", config.chart.signal);

    metrics::init().context("Failed to register metrics")?;

    let service = Arc::new(ChartService::from_config(&config)?);
    let server = WebServer::new(service);
    server
        .start(&config.server.host, config.server.port)
        .await?;

    Ok(())
}
