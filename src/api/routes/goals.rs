//! Goal Routes
//!
//! - GET /api/goals
//! - POST /api/goals
//! - DELETE /api/goals/:id

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::DeletedResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::sync::{Goal, NewGoal, RecordId};

/// GET /api/goals
pub async fn list_goals(State(state): State<Arc<AppState>>) -> Json<Vec<Goal>> {
    Json(state.store.goals().await)
}

/// POST /api/goals
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewGoal>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let goal = state.store.add_goal(req).await?;
    tracing::info!(goal_id = goal.id, title = %goal.title, "Created goal");
    Ok((StatusCode::CREATED, Json(goal)))
}

/// DELETE /api/goals/:id
pub async fn delete_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<RecordId>,
) -> ApiResult<Json<DeletedResponse>> {
    state.store.remove_goal(id).await?;
    tracing::info!(goal_id = id, "Deleted goal");
    Ok(Json(DeletedResponse::ok()))
}
