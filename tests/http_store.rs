use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;

use zenith::api::{build_router, ApiConfig, AppState};
use zenith::sync::{
    Collection, DashboardClient, HttpStore, HttpStoreConfig, MemoryStore, RemoteStore, SyncError,
    Task, TaskForm,
};

struct TestServer {
    base_url: String,
    store: Arc<MemoryStore>,
    handle: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Serve the mock API on an ephemeral port
async fn spawn_server(store: MemoryStore) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let store = Arc::new(store);

    let app = build_router(AppState::new(Arc::clone(&store), ApiConfig::default()));
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
        store,
        handle,
    }
}

fn http_store(server: &TestServer) -> HttpStore {
    HttpStore::new(&HttpStoreConfig {
        base_url: server.base_url.clone(),
        request_timeout_ms: Some(5_000),
    })
    .unwrap()
}

#[tokio::test]
async fn post_task_then_get_includes_assigned_id() {
    let server = spawn_server(MemoryStore::new()).await;
    let store = http_store(&server);

    let created = store
        .post(
            "/api/tasks",
            json!({
                "task": "Write report",
                "project": "Docs",
                "priority": "High",
                "due_date": "2024-02-01",
                "status": "Not Started"
            }),
        )
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    let tasks: Vec<Task> = serde_json::from_value(store.get("/api/tasks").await.unwrap()).unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, id);
    assert_eq!(tasks[0].title, "Write report");
}

#[tokio::test]
async fn delete_missing_habit_surfaces_body_verbatim() {
    let server = spawn_server(MemoryStore::with_demo_data()).await;
    let store = http_store(&server);

    let err = store.delete("/api/habits/7").await.unwrap_err();

    assert_eq!(
        err,
        SyncError::Remote {
            status: 404,
            body: "habit 7 not found".to_string()
        }
    );
    assert_eq!(err.to_string(), "habit 7 not found");
}

#[tokio::test]
async fn dashboard_round_trip_over_http() {
    let server = spawn_server(MemoryStore::with_demo_data()).await;
    let client = DashboardClient::new(http_store(&server));

    let report = client.load_all().await;
    assert!(report.is_complete());
    assert_eq!(server.store.total_reads(), 5);

    let mut form = TaskForm {
        title: "Book dentist".to_string(),
        due_date: "2030-01-15".to_string(),
        ..Default::default()
    };
    client.create_task(&mut form).await.unwrap();
    assert!(form.title.is_empty());
    assert_eq!(server.store.total_reads(), 10);

    let tasks = client.load_tasks().await.unwrap();
    let added = tasks.iter().find(|t| t.title == "Book dentist").unwrap();

    client.delete_task(added.id).await.unwrap();

    let tasks = client.load_tasks().await.unwrap();
    assert!(tasks.iter().all(|t| t.title != "Book dentist"));
    assert_eq!(client.rendered_rows(Collection::Tasks).await, Some(3));
}

#[tokio::test]
async fn summary_order_survives_the_wire() {
    let server = spawn_server(MemoryStore::with_demo_data()).await;
    let client = DashboardClient::new(http_store(&server));

    let summary = client.load_summary().await.unwrap();
    let labels: Vec<&str> = summary.tiles.iter().map(|t| t.label.as_str()).collect();

    assert_eq!(
        labels,
        vec![
            "Tasks Due Today",
            "Habits Completed This Week",
            "Goals In Progress",
            "Avg. Stress Level"
        ]
    );
}
