//! Application State
//!
//! Shared state accessible by all API handlers.

use crate::sync::MemoryStore;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Records served by the API
    pub store: Arc<MemoryStore>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<MemoryStore>, config: ApiConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Build the store the config asks for: demo records or empty
    pub fn from_config(config: ApiConfig) -> Self {
        let store = if config.seed_demo_data {
            MemoryStore::with_demo_data()
        } else {
            MemoryStore::new()
        };
        Self::new(Arc::new(store), config)
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Mock API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Start with the demo account's records
    pub seed_demo_data: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            seed_demo_data: true,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
