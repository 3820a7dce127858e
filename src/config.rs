//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::settings::DashboardSettings;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub dashboard: DashboardSettings,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend the CLI preview talks to
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Fixture server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON response body served at the dashboard endpoint
    pub fixture: Option<PathBuf>,

    /// Built frontend served for every other path
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8085
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            fixture: None,
            static_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("budgetboard").join("config.toml")),
            Some(PathBuf::from("./budgetboard.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("BUDGETBOARD_BASE_URL") {
            self.client.base_url = url;
        }
        if let Ok(secs) = std::env::var("BUDGETBOARD_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse() {
                self.client.timeout_secs = s;
            }
        }

        if let Ok(endpoint) = std::env::var("BUDGETBOARD_ENDPOINT") {
            self.dashboard.endpoint = endpoint;
        }
        if let Ok(symbol) = std::env::var("BUDGETBOARD_CURRENCY") {
            self.dashboard.currency.symbol = symbol;
        }

        if let Ok(host) = std::env::var("BUDGETBOARD_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("BUDGETBOARD_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        if let Ok(level) = std::env::var("BUDGETBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("BUDGETBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Budgetboard Configuration
#
# Environment variables override these settings:
# - BUDGETBOARD_BASE_URL
# - BUDGETBOARD_TIMEOUT_SECS
# - BUDGETBOARD_ENDPOINT
# - BUDGETBOARD_CURRENCY
# - BUDGETBOARD_HOST
# - BUDGETBOARD_PORT
# - BUDGETBOARD_LOG_LEVEL
# - BUDGETBOARD_LOG_FORMAT

[client]
# Backend serving the dashboard endpoint
base_url = "http://localhost:5000"

# Request timeout in seconds
timeout_secs = 30

[dashboard]
# Dashboard data endpoint (relative to base_url)
endpoint = "/api/dashboard-data"

# Page contract of the dashboard template
canvas_id = "expenseChart"
banner_id = "dashboard-error"
content_selector = ".max-w-7xl"
total_selector = ".total-expenses"
count_selector = ".category-count"
month_selector = ".this-month"
embedded_data_id = "expense-data"

[dashboard.currency]
symbol = "₹"

[server]
# Fixture server bind address
host = "127.0.0.1"
port = 8085

# Response body served at the dashboard endpoint
# fixture = "fixtures/dashboard.json"

# Built frontend to serve alongside the endpoint
# static_dir = "budgetboard-ui/dist"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
