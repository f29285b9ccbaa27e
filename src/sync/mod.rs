//! Data Sync Layer
//!
//! CRUD client for the dashboard's five remote collections (tasks, habits,
//! goals, journal, summary). Every mutation is followed by a full reload of
//! all five; nothing is patched locally.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use zenith::sync::{Collection, DashboardClient, MemoryStore, TaskForm};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DashboardClient::new(Arc::new(MemoryStore::with_demo_data()));
//!
//! let mut form = TaskForm {
//!     title: "Review quarterly plan".to_string(),
//!     ..Default::default()
//! };
//! client.create_task(&mut form).await?;
//!
//! let tasks = client.load_tasks().await?;
//! assert!(tasks.iter().any(|t| t.title == "Review quarterly plan"));
//! assert!(client.rendered(Collection::Tasks).await.is_some());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod forms;
pub mod memory;
pub mod render;
pub mod store;
pub mod types;

pub use client::{DashboardClient, LoadReport, SyncEvent};
pub use error::{SyncError, SyncResult, ValidationError};
pub use forms::{DashboardForm, GoalForm, HabitForm, JournalForm, TaskForm};
pub use memory::{MemoryStore, StoreError};
pub use store::{HttpStore, HttpStoreConfig, RemoteStore};
pub use types::{
    Collection, Goal, Habit, JournalEntry, Mood, NewGoal, NewHabit, NewJournalEntry, NewTask,
    Priority, RecordId, Summary, SummaryTile, Task, TaskStatus, WeekFlags,
};
