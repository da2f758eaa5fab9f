use crate::config::LoggingConfig;
use crate::error::{Error, Result};
use chrono::Local;
use log::{LevelFilter, Metadata, Record};
use std::fs::OpenOptions;
use std::io::Write;
use std::str::FromStr;
use std::sync::Mutex;

/// Appends `timestamp [LEVEL] target: message` lines to a file.
pub struct Logger {
    file: Mutex<std::fs::File>,
    level: LevelFilter,
}

impl Logger {
    pub fn new(log_file: &str, level: LevelFilter) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;

        Ok(Self {
            file: Mutex::new(file),
            level,
        })
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let _ = writeln!(
                file,
                "{} [{}] {}: {}",
                timestamp,
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

pub fn parse_level(level: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(level.trim())
        .map_err(|_| Error::ConfigError(format!("unknown log level '{}'", level)))
}

/// File logger when `config.file` is set, `env_logger` otherwise.
/// `RUST_LOG` takes precedence over the configured level for `env_logger`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let level = parse_level(&config.level)?;

    match &config.file {
        Some(path) => {
            let logger = Logger::new(path, level)?;
            log::set_boxed_logger(Box::new(logger))
                .map_err(|e| Error::ConfigError(format!("logger already installed: {}", e)))?;
            log::set_max_level(level);
        }
        None => {
            env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(level.to_string().to_lowercase()),
            )
            .try_init()
            .map_err(|e| Error::ConfigError(format!("logger already installed: {}", e)))?;
        }
    }
    Ok(())
}
