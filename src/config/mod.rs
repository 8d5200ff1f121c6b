// Configuration module entry point
// Loads layered configuration and holds the per-process application state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{Config, DatasetConfig};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "LOOKUP_CONFIG";

impl Config {
    /// Load configuration using the path from the first CLI argument,
    /// `LOOKUP_CONFIG`, or `config.toml` in that order
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::args()
            .nth(1)
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load configuration from specified file path (extension optional)
    ///
    /// Environment variables override the file, e.g. `LOOKUP_SERVER__PORT=9000`
    /// or `LOOKUP_DATASET__PATH=/data/responses.csv`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("LOOKUP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if let DatasetConfig::Csv { delimiter, .. } = &self.dataset {
            if !delimiter.is_ascii() {
                return Err(config::ConfigError::Message(format!(
                    "dataset.delimiter must be a single ASCII character, got '{delimiter}'"
                )));
            }
        }
        if !self.lookup.path.starts_with('/') {
            return Err(config::ConfigError::Message(format!(
                "lookup.path must start with '/', got '{}'",
                self.lookup.path
            )));
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
