//! Data Transfer Objects
//!
//! Response types for the mock API that are not records themselves.
//! Record bodies reuse the sync layer's types so both sides agree on the
//! wire shape.

use serde::{Deserialize, Serialize};

/// Body of a successful delete
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeletedResponse {
    pub ok: bool,
}

impl DeletedResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process serves requests
    pub status: String,
    /// Records currently held, across all collections
    pub records: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
