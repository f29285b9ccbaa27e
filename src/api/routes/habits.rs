//! Habit Routes
//!
//! - GET /api/habits - List habits with their weekly flags
//! - POST /api/habits - Create a habit with every day unset
//! - DELETE /api/habits/:id - Delete a habit

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::DeletedResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::sync::{Habit, NewHabit, RecordId};

/// GET /api/habits
pub async fn list_habits(State(state): State<Arc<AppState>>) -> Json<Vec<Habit>> {
    Json(state.store.habits().await)
}

/// POST /api/habits
pub async fn create_habit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewHabit>,
) -> ApiResult<(StatusCode, Json<Habit>)> {
    let habit = state.store.add_habit(req).await?;
    tracing::info!(habit_id = habit.id, name = %habit.name, "Created habit");
    Ok((StatusCode::CREATED, Json(habit)))
}

/// DELETE /api/habits/:id
pub async fn delete_habit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<RecordId>,
) -> ApiResult<Json<DeletedResponse>> {
    state.store.remove_habit(id).await?;
    tracing::info!(habit_id = id, "Deleted habit");
    Ok(Json(DeletedResponse::ok()))
}
