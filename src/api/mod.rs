//! Zenith mock REST API
//!
//! Development double for the dashboard's backend, built with Axum over an
//! in-memory store. No auth and no persistence: records live as long as
//! the process.
//!
//! # Endpoints
//!
//! - `GET /api/summary` - Aggregate tiles
//! - `GET /api/tasks`, `POST /api/tasks`, `DELETE /api/tasks/:id`
//! - `GET /api/habits`, `POST /api/habits`, `DELETE /api/habits/:id`
//! - `GET /api/goals`, `POST /api/goals`, `DELETE /api/goals/:id`
//! - `GET /api/journal`, `POST /api/journal`
//! - `GET /health` - Health status
//!
//! Errors come back as a status code with the message as a plain-text body.
//!
//! # Example
//!
//! ```rust,no_run
//! use zenith::api::{serve, ApiConfig, AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::default();
//!     let state = AppState::from_config(config.clone());
//!     serve(state, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/summary", get(routes::summary::get_summary))
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route("/tasks/:id", delete(routes::tasks::delete_task))
        .route(
            "/habits",
            get(routes::habits::list_habits).post(routes::habits::create_habit),
        )
        .route("/habits/:id", delete(routes::habits::delete_habit))
        .route(
            "/goals",
            get(routes::goals::list_goals).post(routes::goals::create_goal),
        )
        .route("/goals/:id", delete(routes::goals::delete_goal))
        .route(
            "/journal",
            get(routes::journal::list_entries).post(routes::journal::create_entry),
        );

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(routes::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Zenith mock API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Zenith mock API shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::{Collection, MemoryStore, Task};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        build_router(AppState::new(
            Arc::new(MemoryStore::with_demo_data()),
            ApiConfig::default(),
        ))
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["records"], 10);
    }

    #[tokio::test]
    async fn test_list_tasks() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/api/tasks").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let tasks: Vec<Task> = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(tasks.len(), 3);
    }

    #[tokio::test]
    async fn test_list_routes_count_reads() {
        let store = Arc::new(MemoryStore::with_demo_data());
        let app = build_router(AppState::new(Arc::clone(&store), ApiConfig::default()));

        for uri in ["/api/summary", "/api/tasks", "/api/habits", "/api/goals", "/api/journal"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        assert_eq!(store.total_reads(), 5);
        assert_eq!(store.read_count(Collection::Habits), 1);
    }

    #[tokio::test]
    async fn test_create_task() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/tasks")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        r#"{"task": "Write report", "project": "Docs", "priority": "High", "due_date": "2024-02-01", "status": "Not Started"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert!(body["id"].as_i64().unwrap() > 3);
        assert_eq!(body["task"], "Write report");
    }

    #[tokio::test]
    async fn test_create_task_blank_title() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/tasks")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"task": "  "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "task is required");
    }

    #[tokio::test]
    async fn test_delete_missing_habit() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/habits/7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "habit 7 not found");
    }

    #[tokio::test]
    async fn test_delete_goal() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/goals/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::builder().uri("/api/goals").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let goals: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(goals.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_journal_rejects_delete() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/journal/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_summary_keys_in_order() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/api/summary").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let text = body_text(response).await;
        let due = text.find("Tasks Due Today").unwrap();
        let stress = text.find("Avg. Stress Level").unwrap();
        assert!(due < stress);
    }
}
