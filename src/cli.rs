use crate::config::{Config, SignalMode};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long)] // default handled in main.rs
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Port to listen on, overrides the configuration
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Serve charts from synthetic seed prices instead of live data
    #[arg(long)]
    pub synthetic: bool,
}

impl Cli {
    pub fn apply(&self, config: &mut Config) {
        if self.debug {
            config.logging.level = "debug".to_string();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.synthetic {
            config.chart.signal = SignalMode::Synthetic;
        }
    }
}
