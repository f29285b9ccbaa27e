//! Summary Route
//!
//! - GET /api/summary - Aggregate tiles over the current records

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::sync::Summary;

/// GET /api/summary
///
/// Tasks due today and not completed, habit check-ins this week, goals
/// strictly between 0 and 100 percent, and average journal stress.
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<Summary> {
    Json(state.store.summary().await)
}
