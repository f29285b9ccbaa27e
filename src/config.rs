//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and `ZENITH_*` environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::ApiConfig;
use crate::sync::HttpStoreConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub mock_api: MockApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dashboard client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// No timeout when unset
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: None,
        }
    }
}

impl ClientConfig {
    pub fn store_config(&self) -> HttpStoreConfig {
        HttpStoreConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_ms,
        }
    }
}

/// Mock API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MockApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_seed_demo_data() -> bool {
    true
}

impl Default for MockApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            seed_demo_data: default_seed_demo_data(),
        }
    }
}

impl MockApiConfig {
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            host: self.host.clone(),
            port: self.port,
            seed_demo_data: self.seed_demo_data,
        }
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

impl LoggingConfig {
    /// Filter used when `RUST_LOG` is not set
    pub fn default_directive(&self) -> String {
        format!("zenith={},tower_http={}", self.level, self.level)
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Logs go to stderr so command
/// output on stdout stays clean.
pub fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.default_directive()));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("zenith").join("config.toml")),
            Some(PathBuf::from("/etc/zenith/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply overrides from a variable lookup. Unparseable numbers are ignored.
    fn apply_env_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Client overrides
        if let Some(url) = var("ZENITH_API_URL") {
            self.client.base_url = url;
        }
        if let Some(timeout) = var("ZENITH_API_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.client.request_timeout_ms = Some(ms);
            }
        }

        // Mock API overrides
        if let Some(host) = var("ZENITH_MOCK_HOST") {
            self.mock_api.host = host;
        }
        if let Some(port) = var("ZENITH_MOCK_PORT") {
            if let Ok(p) = port.parse() {
                self.mock_api.port = p;
            }
        }

        // Logging overrides
        if let Some(level) = var("ZENITH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("ZENITH_LOG_FORMAT") {
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
    r#"# Zenith Configuration
#
# Environment variables override these settings:
# - ZENITH_API_URL
# - ZENITH_API_TIMEOUT_MS
# - ZENITH_MOCK_HOST
# - ZENITH_MOCK_PORT
# - ZENITH_LOG_LEVEL
# - ZENITH_LOG_FORMAT

[client]
# Origin of the dashboard REST API
base_url = "http://localhost:5000"

# Per-request timeout in milliseconds (no timeout when unset)
# request_timeout_ms = 10000

[mock_api]
# Mock API server host
host = "127.0.0.1"

# Mock API server port
port = 5000

# Start with the demo account's tasks, habits, goals, and journal entry
seed_demo_data = true

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
