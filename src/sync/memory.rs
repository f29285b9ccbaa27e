//! In-memory collection store
//!
//! Holds the four record collections in process memory and answers the same
//! paths and statuses as the REST contract. Used for demo mode, for the mock
//! API, and in tests.
//!
//! Ids of new records come from the client clock (milliseconds since epoch),
//! bumped when two records land in the same millisecond.

use async_trait::async_trait;
use chrono::{Local, Utc};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use thiserror::Error;
use tokio::sync::RwLock;

use super::error::{SyncError, SyncResult};
use super::store::RemoteStore;
use super::types::{
    Collection, Goal, Habit, JournalEntry, NewGoal, NewHabit, NewJournalEntry, NewTask, Priority,
    RecordId, Summary, Task, TaskStatus, WeekFlags,
};

/// Summary tile labels
pub const TASKS_DUE_TODAY: &str = "Tasks Due Today";
pub const HABITS_COMPLETED: &str = "Habits Completed This Week";
pub const GOALS_IN_PROGRESS: &str = "Goals In Progress";
pub const AVG_STRESS: &str = "Avg. Stress Level";

/// Errors raised by the in-memory store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Invalid(String),

    #[error("{0}")]
    MethodNotAllowed(String),
}

impl StoreError {
    /// HTTP status the REST contract uses for this error
    pub fn status(&self) -> u16 {
        match self {
            StoreError::NotFound(_) => 404,
            StoreError::Invalid(_) => 400,
            StoreError::MethodNotAllowed(_) => 405,
        }
    }
}

impl From<StoreError> for SyncError {
    fn from(err: StoreError) -> Self {
        SyncError::Remote {
            status: err.status(),
            body: err.to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct Records {
    tasks: Vec<Task>,
    habits: Vec<Habit>,
    goals: Vec<Goal>,
    journal: Vec<JournalEntry>,
}

/// In-process collection store
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Records>,
    last_id: AtomicI64,
    reads: [AtomicUsize; 5],
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the demo account's records
    pub fn with_demo_data() -> Self {
        let today = Local::now().date_naive().to_string();
        let task = |id, title: &str, project: &str, priority, status| Task {
            id,
            title: title.to_string(),
            project: project.to_string(),
            priority: Some(priority),
            due_date: today.clone(),
            status: Some(status),
        };
        let habit = |id, name: &str, days: [u8; 7]| Habit {
            id,
            name: name.to_string(),
            week: WeekFlags(days.map(|d| d != 0)),
        };
        let goal = |id, title: &str, steps: &str, progress| Goal {
            id,
            title: title.to_string(),
            action_steps: steps.to_string(),
            progress,
        };

        let records = Records {
            tasks: vec![
                task(1, "Define weekly goals", "Zenith", Priority::High, TaskStatus::NotStarted),
                task(2, "Review project milestones", "Client Work", Priority::Medium, TaskStatus::InProgress),
                task(3, "Plan for next week", "Personal", Priority::Low, TaskStatus::Completed),
            ],
            habits: vec![
                habit(1, "Meditate", [1, 1, 0, 1, 1, 0, 1]),
                habit(2, "Exercise", [1, 0, 1, 1, 0, 0, 1]),
                habit(3, "Plan Tomorrow", [0, 1, 1, 0, 1, 1, 1]),
            ],
            goals: vec![
                goal(1, "Launch Zenith", "Complete MVP, Setup billing, Launch", 60),
                goal(2, "Improve Health", "Workout 3x/week, Track meals, Sleep 8 hrs", 40),
                goal(3, "Read 12 Books", "Read 1 book/month, Review notes", 25),
            ],
            journal: vec![JournalEntry {
                id: Some(1),
                date: today.clone(),
                mood: Some("Calm".into()),
                stress: Some(3),
                gratitude: "Good sleep, finished project milestone".to_string(),
                highlight: "Walk in the park".to_string(),
                notes: "Feeling productive and calm overall.".to_string(),
            }],
        };

        Self {
            records: RwLock::new(records),
            last_id: AtomicI64::new(3),
            reads: Default::default(),
        }
    }

    /// Next record id: the current millisecond, or one past the last id issued
    fn next_id(&self) -> RecordId {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        now.max(previous + 1)
    }

    fn record_read(&self, collection: Collection) {
        self.reads[collection.index()].fetch_add(1, Ordering::SeqCst);
    }

    /// Number of whole-collection reads served for a collection
    pub fn read_count(&self, collection: Collection) -> usize {
        self.reads[collection.index()].load(Ordering::SeqCst)
    }

    /// Number of whole-collection reads served across all collections
    pub fn total_reads(&self) -> usize {
        Collection::ALL.iter().map(|c| self.read_count(*c)).sum()
    }

    /// Records held across the four record collections
    pub async fn record_count(&self) -> usize {
        let records = self.records.read().await;
        records.tasks.len() + records.habits.len() + records.goals.len() + records.journal.len()
    }

    // ============ Tasks ============

    /// Tasks ordered by due date (earliest first), then by priority
    /// (highest first). Counts as one read.
    pub async fn tasks(&self) -> Vec<Task> {
        self.record_read(Collection::Tasks);
        let mut tasks = self.records.read().await.tasks.clone();
        tasks.sort_by(|a, b| {
            a.due_date
                .cmp(&b.due_date)
                .then_with(|| priority_rank(b).cmp(&priority_rank(a)))
        });
        tasks
    }

    pub async fn add_task(&self, new: NewTask) -> Result<Task, StoreError> {
        if new.task.trim().is_empty() {
            return Err(StoreError::Invalid("task is required".to_string()));
        }
        let task = Task {
            id: self.next_id(),
            title: new.task,
            project: new.project,
            priority: new.priority,
            due_date: new.due_date,
            status: Some(new.status.unwrap_or(TaskStatus::NotStarted)),
        };
        self.records.write().await.tasks.push(task.clone());
        tracing::debug!(task_id = task.id, "Stored task");
        Ok(task)
    }

    pub async fn remove_task(&self, id: RecordId) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        remove_by_id(&mut records.tasks, id, |t| t.id, "task")
    }

    // ============ Habits ============

    pub async fn habits(&self) -> Vec<Habit> {
        self.record_read(Collection::Habits);
        self.records.read().await.habits.clone()
    }

    pub async fn add_habit(&self, new: NewHabit) -> Result<Habit, StoreError> {
        if new.habit.trim().is_empty() {
            return Err(StoreError::Invalid("habit is required".to_string()));
        }
        let habit = Habit {
            id: self.next_id(),
            name: new.habit,
            week: WeekFlags::default(),
        };
        self.records.write().await.habits.push(habit.clone());
        tracing::debug!(habit_id = habit.id, "Stored habit");
        Ok(habit)
    }

    pub async fn remove_habit(&self, id: RecordId) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        remove_by_id(&mut records.habits, id, |h| h.id, "habit")
    }

    // ============ Goals ============

    pub async fn goals(&self) -> Vec<Goal> {
        self.record_read(Collection::Goals);
        self.records.read().await.goals.clone()
    }

    pub async fn add_goal(&self, new: NewGoal) -> Result<Goal, StoreError> {
        if new.goal.trim().is_empty() {
            return Err(StoreError::Invalid("goal is required".to_string()));
        }
        if !(0..=100).contains(&new.progress) {
            return Err(StoreError::Invalid(format!(
                "progress must be between 0 and 100, got {}",
                new.progress
            )));
        }
        let goal = Goal {
            id: self.next_id(),
            title: new.goal,
            action_steps: new.action_steps,
            progress: new.progress,
        };
        self.records.write().await.goals.push(goal.clone());
        tracing::debug!(goal_id = goal.id, "Stored goal");
        Ok(goal)
    }

    pub async fn remove_goal(&self, id: RecordId) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        remove_by_id(&mut records.goals, id, |g| g.id, "goal")
    }

    // ============ Journal ============

    /// Journal entries, newest date first
    pub async fn journal(&self) -> Vec<JournalEntry> {
        self.record_read(Collection::Journal);
        let mut entries = self.records.read().await.journal.clone();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    pub async fn add_journal_entry(&self, new: NewJournalEntry) -> Result<JournalEntry, StoreError> {
        let entry = JournalEntry {
            id: Some(self.next_id()),
            date: new.date,
            mood: new.mood,
            stress: Some(new.stress),
            gratitude: new.gratitude,
            highlight: new.highlight,
            notes: new.notes,
        };
        self.records.write().await.journal.push(entry.clone());
        tracing::debug!(date = %entry.date, "Stored journal entry");
        Ok(entry)
    }

    // ============ Summary ============

    /// Aggregate tiles over the current records
    pub async fn summary(&self) -> Summary {
        self.record_read(Collection::Summary);
        let today = Local::now().date_naive().to_string();
        let records = self.records.read().await;

        let due_today = records
            .tasks
            .iter()
            .filter(|t| t.due_date == today && t.status != Some(TaskStatus::Completed))
            .count();

        let habits_completed: u32 = records.habits.iter().map(|h| h.week.completed()).sum();

        let goals_in_progress = records
            .goals
            .iter()
            .filter(|g| g.progress > 0 && g.progress < 100)
            .count();

        let stress: Vec<i64> = records.journal.iter().filter_map(|e| e.stress).collect();
        let avg_stress = if stress.is_empty() {
            json!(0)
        } else {
            let avg = stress.iter().sum::<i64>() as f64 / stress.len() as f64;
            json!((avg * 10.0).round() / 10.0)
        };

        Summary::default()
            .tile(TASKS_DUE_TODAY, due_today)
            .tile(HABITS_COMPLETED, habits_completed)
            .tile(GOALS_IN_PROGRESS, goals_in_progress)
            .tile(AVG_STRESS, avg_stress)
    }
}

/// Tasks without a priority sort after every labelled one
fn priority_rank(task: &Task) -> i8 {
    match &task.priority {
        Some(Priority::High) => 3,
        Some(Priority::Medium) => 2,
        Some(Priority::Low) => 1,
        Some(Priority::Other(_)) => 0,
        None => -1,
    }
}

fn remove_by_id<T>(
    records: &mut Vec<T>,
    id: RecordId,
    id_of: impl Fn(&T) -> RecordId,
    kind: &str,
) -> Result<(), StoreError> {
    let before = records.len();
    records.retain(|r| id_of(r) != id);
    if records.len() == before {
        return Err(StoreError::NotFound(format!("{} {} not found", kind, id)));
    }
    tracing::debug!(kind, id, "Removed record");
    Ok(())
}

/// Split `/api/<collection>[/<id>]`
fn parse_path(path: &str) -> Result<(Collection, Option<RecordId>), StoreError> {
    let not_found = || StoreError::NotFound(format!("No such path: {}", path));

    let rest = path.strip_prefix("/api/").ok_or_else(not_found)?;
    let mut parts = rest.trim_end_matches('/').splitn(2, '/');
    let collection: Collection = parts
        .next()
        .unwrap_or_default()
        .parse()
        .map_err(|_| not_found())?;
    let id = match parts.next() {
        Some(raw) => Some(raw.parse::<RecordId>().map_err(|_| not_found())?),
        None => None,
    };

    Ok((collection, id))
}

fn decode<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, StoreError> {
    serde_json::from_value(body).map_err(|e| StoreError::Invalid(format!("Invalid body: {}", e)))
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn get(&self, path: &str) -> SyncResult<Value> {
        let (collection, id) = parse_path(path)?;
        if id.is_some() {
            return Err(StoreError::MethodNotAllowed(format!("GET not allowed on {}", path)).into());
        }

        let value = match collection {
            Collection::Summary => serde_json::to_value(self.summary().await)?,
            Collection::Tasks => serde_json::to_value(self.tasks().await)?,
            Collection::Habits => serde_json::to_value(self.habits().await)?,
            Collection::Goals => serde_json::to_value(self.goals().await)?,
            Collection::Journal => serde_json::to_value(self.journal().await)?,
        };
        Ok(value)
    }

    async fn post(&self, path: &str, body: Value) -> SyncResult<Value> {
        let (collection, id) = parse_path(path)?;
        if id.is_some() {
            return Err(StoreError::MethodNotAllowed(format!("POST not allowed on {}", path)).into());
        }

        let created = match collection {
            Collection::Tasks => serde_json::to_value(self.add_task(decode(body)?).await?)?,
            Collection::Habits => serde_json::to_value(self.add_habit(decode(body)?).await?)?,
            Collection::Goals => serde_json::to_value(self.add_goal(decode(body)?).await?)?,
            Collection::Journal => {
                serde_json::to_value(self.add_journal_entry(decode(body)?).await?)?
            }
            Collection::Summary => {
                return Err(
                    StoreError::MethodNotAllowed(format!("POST not allowed on {}", path)).into(),
                )
            }
        };
        Ok(created)
    }

    async fn delete(&self, path: &str) -> SyncResult<()> {
        let (collection, id) = parse_path(path)?;
        let id = id.ok_or_else(|| {
            StoreError::MethodNotAllowed(format!("DELETE not allowed on {}", path))
        })?;

        match collection {
            Collection::Tasks => self.remove_task(id).await?,
            Collection::Habits => self.remove_habit(id).await?,
            Collection::Goals => self.remove_goal(id).await?,
            Collection::Journal | Collection::Summary => {
                return Err(
                    StoreError::MethodNotAllowed(format!("DELETE not allowed on {}", path)).into(),
                )
            }
        }
        Ok(())
    }
}
