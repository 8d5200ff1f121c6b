// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub health: HealthConfig,
    pub lookup: LookupConfig,
    pub auth: AuthConfig,
    pub dataset: DatasetConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level written: debug, info, warn or error
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    pub error_log_file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            access_log: true,
            access_log_format: "combined".to_string(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            keep_alive_timeout: 75,
            read_timeout: 30,
            write_timeout: 30,
            max_connections: None,
        }
    }
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            server_name: "sheet-lookup/0.1".to_string(),
            enable_cors: false,
        }
    }
}

/// Health check configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HealthConfig {
    /// Enable health check endpoints
    pub enabled: bool,
    /// Liveness probe path (default: /healthz)
    pub liveness_path: String,
    /// Readiness probe path (default: /readyz), also verifies the dataset
    pub readiness_path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            liveness_path: "/healthz".to_string(),
            readiness_path: "/readyz".to_string(),
        }
    }
}

/// Lookup endpoint configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LookupConfig {
    /// Request path served by the lookup
    pub path: String,
    /// Query parameter carrying the identifier
    pub id_param: String,
    /// Zero-based identifier column
    pub id_column: usize,
    /// Header naming the identifier column; wins over `id_column` when set
    pub id_header: Option<String>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            path: "/exec".to_string(),
            id_param: "id".to_string(),
            id_column: 1,
            id_header: None,
        }
    }
}

/// Optional API key check, off unless `api_key` is set
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    pub api_key: Option<String>,
    /// Query parameter carrying the key
    pub param: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            param: "apiKey".to_string(),
        }
    }
}

/// Dataset source definition
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DatasetConfig {
    /// Delimited text file, first record is the header row
    Csv {
        path: String,
        #[serde(default = "default_delimiter")]
        delimiter: char,
    },
    /// JSON grid or spreadsheet value-range document
    Json { path: String },
}

#[allow(clippy::missing_const_for_fn)]
fn default_delimiter() -> char {
    ','
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self::Csv {
            path: "sheet.csv".to_string(),
            delimiter: default_delimiter(),
        }
    }
}
