//! Dashboard client
//!
//! Holds the latest rendered snapshot of each collection and keeps it in step
//! with the remote store by full refetch: every successful mutation is
//! followed by a reload of all five collections.
//!
//! Loads are stamped with a per-collection issue sequence. A response is only
//! rendered when it is newer than the last one rendered for that collection,
//! so a slow read that was overtaken by a later one is dropped.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{broadcast, RwLock};

use crate::view::Node;

use super::error::{SyncError, SyncResult, ValidationError};
use super::forms::{DashboardForm, GoalForm, HabitForm, JournalForm, TaskForm};
use super::render;
use super::store::RemoteStore;
use super::types::{Collection, Goal, Habit, JournalEntry, RecordId, Summary, Task};

const EVENT_CAPACITY: usize = 64;

/// Notices published for the toast surface
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// A collection's table was replaced with a fresh snapshot
    TableRendered { collection: Collection, rows: usize },
    /// A read failed; the previous snapshot is still shown
    LoadFailed {
        collection: Collection,
        error: SyncError,
    },
    /// A create or delete was rejected or never arrived
    MutationFailed {
        collection: Collection,
        error: SyncError,
    },
    /// A form was rejected before anything was sent
    ValidationFailed {
        collection: Collection,
        error: ValidationError,
    },
}

/// Outcome of one `load_all`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Read succeeded and its snapshot is now rendered
    pub refreshed: Vec<Collection>,
    /// Read succeeded but a newer read had already rendered
    pub discarded: Vec<Collection>,
    pub failed: Vec<(Collection, SyncError)>,
}

impl LoadReport {
    fn record<T>(&mut self, collection: Collection, result: SyncResult<Loaded<T>>) {
        match result {
            Ok(loaded) if loaded.rendered => self.refreshed.push(collection),
            Ok(_) => self.discarded.push(collection),
            Err(err) => self.failed.push((collection, err)),
        }
    }

    /// Every collection was read successfully
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A successful read and whether it reached the table
struct Loaded<T> {
    records: T,
    rendered: bool,
}

impl<T> Loaded<T> {
    fn into_records(self) -> T {
        self.records
    }
}

#[derive(Debug, Clone)]
struct RenderedTable {
    seq: u64,
    rows: usize,
    body: Node,
}

/// Full-refetch CRUD client over the five dashboard collections
pub struct DashboardClient<S> {
    store: S,
    tables: RwLock<HashMap<Collection, RenderedTable>>,
    issued: [AtomicU64; 5],
    events: broadcast::Sender<SyncEvent>,
}

impl<S: RemoteStore> DashboardClient<S> {
    pub fn new(store: S) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store,
            tables: RwLock::new(HashMap::new()),
            issued: Default::default(),
            events,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Subscribe to sync notices
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.events.subscribe()
    }

    /// The currently rendered body of a collection, if it has ever loaded
    pub async fn rendered(&self, collection: Collection) -> Option<Node> {
        self.tables
            .read()
            .await
            .get(&collection)
            .map(|table| table.body.clone())
    }

    /// Number of rows in the currently rendered snapshot
    pub async fn rendered_rows(&self, collection: Collection) -> Option<usize> {
        self.tables
            .read()
            .await
            .get(&collection)
            .map(|table| table.rows)
    }

    fn publish(&self, event: SyncEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    // ============================================
    // Loads
    // ============================================

    async fn load<T, F>(
        &self,
        collection: Collection,
        rows: F,
        render: fn(&T) -> Node,
    ) -> SyncResult<Loaded<T>>
    where
        T: DeserializeOwned + Send,
        F: FnOnce(&T) -> usize,
    {
        let seq = self.issued[collection.index()].fetch_add(1, Ordering::SeqCst) + 1;

        let result = match self.store.get(collection.path()).await {
            Ok(value) => serde_json::from_value::<T>(value).map_err(SyncError::from),
            Err(err) => Err(err),
        };

        match result {
            Ok(records) => {
                let rows = rows(&records);
                let rendered = self.apply(collection, seq, rows, render(&records)).await;
                Ok(Loaded { records, rendered })
            }
            Err(err) => {
                tracing::warn!(collection = %collection, seq, error = %err, "Load failed");
                self.publish(SyncEvent::LoadFailed {
                    collection,
                    error: err.clone(),
                });
                Err(err)
            }
        }
    }

    /// Replace a table unless a newer read has already rendered. Returns
    /// whether the table was replaced.
    async fn apply(&self, collection: Collection, seq: u64, rows: usize, body: Node) -> bool {
        let mut tables = self.tables.write().await;
        if let Some(current) = tables.get(&collection) {
            if current.seq >= seq {
                tracing::debug!(
                    collection = %collection,
                    seq,
                    rendered = current.seq,
                    "Discarding stale response"
                );
                return false;
            }
        }

        tables.insert(collection, RenderedTable { seq, rows, body });
        drop(tables);

        tracing::debug!(collection = %collection, seq, rows, "Table rendered");
        self.publish(SyncEvent::TableRendered { collection, rows });
        true
    }

    async fn fetch_summary(&self) -> SyncResult<Loaded<Summary>> {
        self.load(Collection::Summary, |s: &Summary| s.tiles.len(), render::summary_tiles)
            .await
    }

    async fn fetch_tasks(&self) -> SyncResult<Loaded<Vec<Task>>> {
        self.load(Collection::Tasks, |t: &Vec<Task>| t.len(), |t| render::tasks_body(t))
            .await
    }

    async fn fetch_habits(&self) -> SyncResult<Loaded<Vec<Habit>>> {
        self.load(Collection::Habits, |h: &Vec<Habit>| h.len(), |h| render::habits_body(h))
            .await
    }

    async fn fetch_goals(&self) -> SyncResult<Loaded<Vec<Goal>>> {
        self.load(Collection::Goals, |g: &Vec<Goal>| g.len(), |g| render::goals_body(g))
            .await
    }

    async fn fetch_journal(&self) -> SyncResult<Loaded<Vec<JournalEntry>>> {
        self.load(
            Collection::Journal,
            |j: &Vec<JournalEntry>| j.len(),
            |j| render::journal_body(j),
        )
        .await
    }

    pub async fn load_summary(&self) -> SyncResult<Summary> {
        self.fetch_summary().await.map(Loaded::into_records)
    }

    pub async fn load_tasks(&self) -> SyncResult<Vec<Task>> {
        self.fetch_tasks().await.map(Loaded::into_records)
    }

    pub async fn load_habits(&self) -> SyncResult<Vec<Habit>> {
        self.fetch_habits().await.map(Loaded::into_records)
    }

    pub async fn load_goals(&self) -> SyncResult<Vec<Goal>> {
        self.fetch_goals().await.map(Loaded::into_records)
    }

    pub async fn load_journal(&self) -> SyncResult<Vec<JournalEntry>> {
        self.fetch_journal().await.map(Loaded::into_records)
    }

    /// Read all five collections concurrently and wait for every one.
    /// Each table renders as soon as its own read completes.
    pub async fn load_all(&self) -> LoadReport {
        let (summary, tasks, habits, goals, journal) = tokio::join!(
            self.fetch_summary(),
            self.fetch_tasks(),
            self.fetch_habits(),
            self.fetch_goals(),
            self.fetch_journal(),
        );

        let mut report = LoadReport::default();
        report.record(Collection::Summary, summary);
        report.record(Collection::Tasks, tasks);
        report.record(Collection::Habits, habits);
        report.record(Collection::Goals, goals);
        report.record(Collection::Journal, journal);

        if report.is_complete() {
            tracing::debug!("Dashboard refreshed");
        } else {
            tracing::warn!(failed = report.failed.len(), "Dashboard partially refreshed");
        }
        report
    }

    // ============================================
    // Mutations
    // ============================================

    fn validated<P>(
        &self,
        collection: Collection,
        payload: Result<P, ValidationError>,
    ) -> SyncResult<P> {
        payload.map_err(|error| {
            tracing::debug!(collection = %collection, error = %error, "Form rejected");
            self.publish(SyncEvent::ValidationFailed {
                collection,
                error: error.clone(),
            });
            SyncError::Validation(error)
        })
    }

    fn mutation_failed(&self, collection: Collection, err: SyncError) -> SyncError {
        tracing::warn!(collection = %collection, error = %err, "Mutation failed");
        self.publish(SyncEvent::MutationFailed {
            collection,
            error: err.clone(),
        });
        err
    }

    async fn create<P: Serialize>(&self, collection: Collection, payload: &P) -> SyncResult<()> {
        let body = serde_json::to_value(payload)?;
        match self.store.post(collection.path(), body).await {
            Ok(created) => {
                tracing::info!(collection = %collection, id = ?created.get("id"), "Record created");
                Ok(())
            }
            Err(err) => Err(self.mutation_failed(collection, err)),
        }
    }

    /// Add a task. On success the dashboard is reloaded and the title,
    /// project, and due date are cleared; on failure the form is untouched.
    pub async fn create_task(&self, form: &mut TaskForm) -> SyncResult<LoadReport> {
        let payload = self.validated(Collection::Tasks, form.to_payload())?;
        self.create(Collection::Tasks, &payload).await?;
        let report = self.load_all().await;
        form.clear();
        Ok(report)
    }

    pub async fn create_habit(&self, form: &mut HabitForm) -> SyncResult<LoadReport> {
        let payload = self.validated(Collection::Habits, form.to_payload())?;
        self.create(Collection::Habits, &payload).await?;
        let report = self.load_all().await;
        form.clear();
        Ok(report)
    }

    pub async fn create_goal(&self, form: &mut GoalForm) -> SyncResult<LoadReport> {
        let payload = self.validated(Collection::Goals, form.to_payload())?;
        self.create(Collection::Goals, &payload).await?;
        let report = self.load_all().await;
        form.clear();
        Ok(report)
    }

    pub async fn create_journal_entry(&self, form: &mut JournalForm) -> SyncResult<LoadReport> {
        let payload = self.validated(Collection::Journal, form.to_payload())?;
        self.create(Collection::Journal, &payload).await?;
        let report = self.load_all().await;
        form.clear();
        Ok(report)
    }

    /// Submit a form collected from a dashboard add form
    pub async fn submit(&self, form: &mut DashboardForm) -> SyncResult<LoadReport> {
        match form {
            DashboardForm::Task(form) => self.create_task(form).await,
            DashboardForm::Habit(form) => self.create_habit(form).await,
            DashboardForm::Goal(form) => self.create_goal(form).await,
            DashboardForm::Journal(form) => self.create_journal_entry(form).await,
        }
    }

    /// Delete a record by id, then reload everything whether or not the
    /// delete succeeded. Returns the delete outcome.
    pub async fn delete_record(
        &self,
        collection: Collection,
        id: RecordId,
    ) -> SyncResult<LoadReport> {
        if !collection.deletable() {
            return Err(self.mutation_failed(collection, SyncError::NotDeletable(collection)));
        }

        let outcome = self.store.delete(&collection.record_path(id)).await;
        let report = self.load_all().await;

        match outcome {
            Ok(()) => {
                tracing::info!(collection = %collection, id, "Record deleted");
                Ok(report)
            }
            Err(err) => Err(self.mutation_failed(collection, err)),
        }
    }

    pub async fn delete_task(&self, id: RecordId) -> SyncResult<LoadReport> {
        self.delete_record(Collection::Tasks, id).await
    }

    pub async fn delete_habit(&self, id: RecordId) -> SyncResult<LoadReport> {
        self.delete_record(Collection::Habits, id).await
    }

    pub async fn delete_goal(&self, id: RecordId) -> SyncResult<LoadReport> {
        self.delete_record(Collection::Goals, id).await
    }
}
