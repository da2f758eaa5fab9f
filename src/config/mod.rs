use crate::api::dexscreener::API_BASE_URL;
use crate::api::pair_resolver::{DEFAULT_ALLOWED_DEXES, DEFAULT_QUOTE_SYMBOLS};
use crate::error::{Error, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub aggregator: AggregatorConfig,
    #[serde(default)]
    pub price_service: PriceServiceConfig,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AggregatorConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub allowed_dexes: Vec<String>,
    pub quote_symbols: Vec<String>,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            timeout_secs: 10,
            allowed_dexes: DEFAULT_ALLOWED_DEXES.iter().map(|s| s.to_string()).collect(),
            quote_symbols: DEFAULT_QUOTE_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PriceServiceConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for PriceServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000/api".to_string(),
            timeout_secs: 5,
        }
    }
}

/// Where the chart takes its live price and trend from.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SignalMode {
    /// Pair lookup on the aggregator plus the bot's price service.
    #[default]
    Aggregator,
    /// Random seed price, no upstream calls.
    Synthetic,
}

impl std::str::FromStr for SignalMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aggregator" => Ok(SignalMode::Aggregator),
            "synthetic" => Ok(SignalMode::Synthetic),
            other => Err(Error::ConfigError(format!("unknown chart signal '{}'", other))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ChartConfig {
    #[serde(default)]
    pub signal: SignalMode,
    /// Fixed seed for reproducible charts. Entropy per request when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&config_str)?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            info!("No configuration at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        fs::write(path, config_str)?;
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("DASHBOARD_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("DASHBOARD_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| Error::ConfigError(format!("invalid DASHBOARD_PORT '{}'", port)))?;
        }
        if let Some(url) = lookup("AGGREGATOR_BASE_URL") {
            self.aggregator.base_url = url;
        }
        if let Some(url) = lookup("PRICE_SERVICE_URL") {
            self.price_service.base_url = url;
        }
        if let Some(signal) = lookup("CHART_SIGNAL") {
            self.chart.signal = signal.parse()?;
        }
        if let Some(seed) = lookup("CHART_RNG_SEED") {
            self.chart.rng_seed = Some(
                seed.parse()
                    .map_err(|_| Error::ConfigError(format!("invalid CHART_RNG_SEED '{}'", seed)))?,
            );
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::ConfigError("server.port must be non-zero".into()));
        }
        if self.server.host.trim().is_empty() {
            return Err(Error::ConfigError("server.host is empty".into()));
        }
        if self.chart.signal == SignalMode::Aggregator {
            if self.aggregator.base_url.trim().is_empty() {
                return Err(Error::ConfigError("aggregator.base_url is empty".into()));
            }
            if self.price_service.base_url.trim().is_empty() {
                return Err(Error::ConfigError("price_service.base_url is empty".into()));
            }
            if self.aggregator.allowed_dexes.is_empty()
                || self.aggregator.quote_symbols.is_empty()
            {
                return Err(Error::ConfigError(
                    "aggregator.allowed_dexes and quote_symbols must not be empty".into(),
                ));
            }
            if self.aggregator.timeout_secs == 0 || self.price_service.timeout_secs == 0 {
                return Err(Error::ConfigError("upstream timeouts must be non-zero".into()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [chart]
            signal = "synthetic"
            rng_seed = 42
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.chart.signal, SignalMode::Synthetic);
        assert_eq!(config.chart.rng_seed, Some(42));
        assert_eq!(config.aggregator, AggregatorConfig::default());
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let path = env::temp_dir()
            .join(format!("paper-dashboard-config-{}.toml", std::process::id()));
        let mut config = Config::default();
        config.server.port = 4100;
        config.chart.rng_seed = Some(7);

        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = Path::new("/nonexistent/paper-dashboard.toml");
        let config = Config::load_or_default(path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("DASHBOARD_PORT", "9000"),
            ("CHART_SIGNAL", "Synthetic"),
            ("CHART_RNG_SEED", "123"),
            ("PRICE_SERVICE_URL", "http://prices.internal"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.chart.signal, SignalMode::Synthetic);
        assert_eq!(config.chart.rng_seed, Some(123));
        assert_eq!(config.price_service.base_url, "http://prices.internal");
    }

    #[test]
    fn test_bad_override_rejected() {
        let mut config = Config::default();
        let result = config.apply_overrides(|key| match key {
            "DASHBOARD_PORT" => Some("not-a-port".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_validation() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.aggregator.allowed_dexes.clear();
        assert!(config.validate().is_err());

        // the synthetic signal never talks to the aggregator
        config.chart.signal = SignalMode::Synthetic;
        assert!(config.validate().is_ok());
    }
}
