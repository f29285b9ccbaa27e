//! Journal Routes
//!
//! - GET /api/journal - Entries, newest date first
//! - POST /api/journal - Add an entry
//!
//! Entries cannot be deleted.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::sync::{JournalEntry, NewJournalEntry};

/// GET /api/journal
pub async fn list_entries(State(state): State<Arc<AppState>>) -> Json<Vec<JournalEntry>> {
    Json(state.store.journal().await)
}

/// POST /api/journal
pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewJournalEntry>,
) -> ApiResult<(StatusCode, Json<JournalEntry>)> {
    let entry = state.store.add_journal_entry(req).await?;
    tracing::info!(date = %entry.date, "Created journal entry");
    Ok((StatusCode::CREATED, Json(entry)))
}
