//! Task Routes
//!
//! - GET /api/tasks - List tasks, earliest due date first, then highest priority
//! - POST /api/tasks - Create a task
//! - DELETE /api/tasks/:id - Delete a task

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::DeletedResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::sync::{NewTask, RecordId, Task};

/// GET /api/tasks
pub async fn list_tasks(State(state): State<Arc<AppState>>) -> Json<Vec<Task>> {
    Json(state.store.tasks().await)
}

/// POST /api/tasks
///
/// Status defaults to "Not Started" when omitted.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewTask>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = state.store.add_task(req).await?;
    tracing::info!(task_id = task.id, title = %task.title, "Created task");
    Ok((StatusCode::CREATED, Json(task)))
}

/// DELETE /api/tasks/:id
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<RecordId>,
) -> ApiResult<Json<DeletedResponse>> {
    state.store.remove_task(id).await?;
    tracing::info!(task_id = id, "Deleted task");
    Ok(Json(DeletedResponse::ok()))
}
