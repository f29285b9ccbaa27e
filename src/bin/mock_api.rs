//! Zenith Mock API Server
//!
//! Run with: cargo run --bin zenith-mock-api
//!
//! # Configuration
//!
//! Reads the `[mock_api]` and `[logging]` sections of the config file.
//! Environment variables:
//! - `ZENITH_MOCK_HOST`: Host to bind to (default: 127.0.0.1)
//! - `ZENITH_MOCK_PORT`: Port to listen on (default: 5000)
//! - `RUST_LOG`: Log filter (default: zenith=info,tower_http=info)

use zenith::api::{serve, AppState};
use zenith::config::{init_logging, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    init_logging(&config.logging);

    tracing::info!("Starting Zenith mock API v{}", env!("CARGO_PKG_VERSION"));

    let api_config = config.mock_api.api_config();
    if api_config.seed_demo_data {
        tracing::info!("Seeding demo records");
    }

    let state = AppState::from_config(api_config.clone());
    serve(state, &api_config).await?;

    Ok(())
}
