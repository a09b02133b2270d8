//! Configuration management for the STK Manager server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides such as `STK__SERVER__PORT`
//!    (`__` after the prefix and between nested keys)

use std::path::PathBuf;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::aggregation::DashboardOptions;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Where the stock collection is kept
    pub storage: StorageConfig,

    /// Dashboard breakdown limits
    pub dashboard: DashboardConfig,

    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// JSON file holding the whole collection
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// Groups shown per supplier/destination/product chart
    pub top_n: usize,

    /// Destinations shown in the in-stock vs rejected breakdown
    pub destination_top_n: usize,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of the human-readable format
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("STK_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "127.0.0.1")?
            .set_default("storage.path", "data/stock_data.json")?
            .set_default("dashboard.top_n", 5)?
            .set_default("dashboard.destination_top_n", 6)?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables, e.g. STK__STORAGE__PATH
            .add_source(env_overrides())
            .build()?;

        config.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }
}

/// `__` separates the prefix and each nesting level
fn env_overrides() -> Environment {
    Environment::with_prefix("STK")
        .separator("__")
        .try_parsing(true)
}

impl DashboardConfig {
    pub fn options(&self) -> DashboardOptions {
        DashboardOptions {
            top_n: self.top_n,
            destination_top_n: self.destination_top_n,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            dashboard: DashboardConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/stock_data.json"),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let options = DashboardOptions::default();
        Self {
            top_n: options.top_n,
            destination_top_n: options.destination_top_n,
        }
    }
}
