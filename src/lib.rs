//! # Zenith
//!
//! Client core for a productivity and wellness dashboard: a landing page
//! with auth forms in front of a dashboard of tasks, habits, goals, and a
//! daily journal.
//!
//! ## Modules
//!
//! - [`view`]: View router, page templates, and the render tree
//! - [`sync`]: Full-refetch CRUD client over the dashboard collections
//! - [`api`]: Mock REST API serving the collections from memory
//! - [`config`]: Configuration loading and logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zenith::sync::{DashboardClient, HttpStore, HttpStoreConfig};
//! use zenith::view::{Credentials, ViewRouter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Sign in and land on the dashboard
//!     let mut router = ViewRouter::new();
//!     router.handle_auth(Credentials::new("demo@zenith.com", "demo123"))?;
//!
//!     // Fill the dashboard tables from the server
//!     let store = HttpStore::new(&HttpStoreConfig::default())?;
//!     let client = DashboardClient::new(store);
//!     let report = client.load_all().await;
//!
//!     println!("Refreshed {} collections", report.refreshed.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod sync;
pub mod view;

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig};

pub use sync::{
    Collection, DashboardClient, HttpStore, LoadReport, MemoryStore, RemoteStore, SyncError,
    SyncEvent, SyncResult, ValidationError,
};

pub use view::{Action, Credentials, Node, RouteError, Session, Transition, View, ViewRouter};
