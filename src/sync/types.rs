//! Dashboard record types
//!
//! Records as the dashboard sees them, plus their mapping onto the JSON shape
//! the remote collection store speaks:
//! - `Task`, `Habit`, `Goal`, `JournalEntry`: one row of a collection
//! - `Summary`: ordered label/value tiles
//! - `NewTask`, `NewHabit`, `NewGoal`, `NewJournalEntry`: create payloads
//! - `Collection`: the five server-backed record sets

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity assigned by the remote store
pub type RecordId = i64;

/// One of the five server-backed record sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Summary,
    Tasks,
    Habits,
    Goals,
    Journal,
}

impl Collection {
    /// Every collection, in the order `load_all` reports them
    pub const ALL: [Collection; 5] = [
        Collection::Summary,
        Collection::Tasks,
        Collection::Habits,
        Collection::Goals,
        Collection::Journal,
    ];

    /// Collection path on the remote store
    pub fn path(&self) -> &'static str {
        match self {
            Collection::Summary => "/api/summary",
            Collection::Tasks => "/api/tasks",
            Collection::Habits => "/api/habits",
            Collection::Goals => "/api/goals",
            Collection::Journal => "/api/journal",
        }
    }

    /// Path of a single record
    pub fn record_path(&self, id: RecordId) -> String {
        format!("{}/{}", self.path(), id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Summary => "summary",
            Collection::Tasks => "tasks",
            Collection::Habits => "habits",
            Collection::Goals => "goals",
            Collection::Journal => "journal",
        }
    }

    /// Whether the store exposes a delete endpoint for this collection
    pub fn deletable(&self) -> bool {
        matches!(
            self,
            Collection::Tasks | Collection::Habits | Collection::Goals
        )
    }

    /// Whether the store accepts new records for this collection
    pub fn creatable(&self) -> bool {
        !matches!(self, Collection::Summary)
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Collection::Summary => 0,
            Collection::Tasks => 1,
            Collection::Habits => 2,
            Collection::Goals => 3,
            Collection::Journal => 4,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" => Ok(Collection::Summary),
            "tasks" => Ok(Collection::Tasks),
            "habits" => Ok(Collection::Habits),
            "goals" => Ok(Collection::Goals),
            "journal" => Ok(Collection::Journal),
            _ => Err(format!(
                "Unknown collection: {}. Use summary, tasks, habits, goals, or journal",
                s
            )),
        }
    }
}

/// Declares a string-backed enum that keeps unknown store values verbatim
/// instead of failing the whole collection decode.
macro_rules! label_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub fn label(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Other(raw) => raw.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                $(if raw.eq_ignore_ascii_case($label) {
                    return $name::$variant;
                })+
                $name::Other(raw)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                $name::from(raw.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.label().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

label_enum! {
    /// Task priority
    Priority {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

label_enum! {
    /// Task progress state
    TaskStatus {
        NotStarted => "Not Started",
        InProgress => "In Progress",
        Completed => "Completed",
    }
}

label_enum! {
    /// Mood recorded in a journal entry
    Mood {
        Great => "Great",
        Good => "Good",
        Calm => "Calm",
        Okay => "Okay",
        Stressed => "Stressed",
        Low => "Low",
    }
}

impl Mood {
    /// Moods offered by the journal form
    pub fn choices() -> [Mood; 6] {
        [
            Mood::Great,
            Mood::Good,
            Mood::Calm,
            Mood::Okay,
            Mood::Stressed,
            Mood::Low,
        ]
    }
}

/// Treat JSON `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A task row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    #[serde(rename = "task", default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub project: String,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "nullable")]
    pub due_date: String,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

/// Monday-first completion flags for one week
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekFlags(pub [bool; 7]);

impl WeekFlags {
    pub const DAYS: [&'static str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

    /// Number of days checked off this week
    pub fn completed(&self) -> u32 {
        self.0.iter().filter(|done| **done).count() as u32
    }

    /// Consecutive checked days ending at the most recent checked day
    pub fn streak(&self) -> u32 {
        self.0
            .iter()
            .rev()
            .skip_while(|done| !**done)
            .take_while(|done| **done)
            .count() as u32
    }
}

/// A habit row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "HabitWire", into = "HabitWire")]
pub struct Habit {
    pub id: RecordId,
    pub name: String,
    pub week: WeekFlags,
}

impl Habit {
    /// Current streak, derived from the weekly flags
    pub fn streak(&self) -> u32 {
        self.week.streak()
    }
}

/// Store representation: one integer column per weekday
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HabitWire {
    id: RecordId,
    #[serde(default, deserialize_with = "nullable")]
    habit: String,
    #[serde(default, deserialize_with = "nullable")]
    mon: i64,
    #[serde(default, deserialize_with = "nullable")]
    tue: i64,
    #[serde(default, deserialize_with = "nullable")]
    wed: i64,
    #[serde(default, deserialize_with = "nullable")]
    thu: i64,
    #[serde(default, deserialize_with = "nullable")]
    fri: i64,
    #[serde(default, deserialize_with = "nullable")]
    sat: i64,
    #[serde(default, deserialize_with = "nullable")]
    sun: i64,
}

impl From<HabitWire> for Habit {
    fn from(wire: HabitWire) -> Self {
        let days = [
            wire.mon, wire.tue, wire.wed, wire.thu, wire.fri, wire.sat, wire.sun,
        ];
        Habit {
            id: wire.id,
            name: wire.habit,
            week: WeekFlags(days.map(|d| d != 0)),
        }
    }
}

impl From<Habit> for HabitWire {
    fn from(habit: Habit) -> Self {
        let [mon, tue, wed, thu, fri, sat, sun] = habit.week.0.map(i64::from);
        HabitWire {
            id: habit.id,
            habit: habit.name,
            mon,
            tue,
            wed,
            thu,
            fri,
            sat,
            sun,
        }
    }
}

/// A goal row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: RecordId,
    #[serde(rename = "goal", default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub action_steps: String,
    #[serde(default, deserialize_with = "nullable")]
    pub progress: i64,
}

/// A journal row. Entries are identified by their date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(rename = "jdate", alias = "date", default, deserialize_with = "nullable")]
    pub date: String,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub stress: Option<i64>,
    #[serde(default, deserialize_with = "nullable")]
    pub gratitude: String,
    #[serde(default, deserialize_with = "nullable")]
    pub highlight: String,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: String,
}

/// One label/value tile of the summary
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTile {
    pub label: String,
    pub value: serde_json::Value,
}

impl SummaryTile {
    /// Value as shown on the tile (strings unquoted)
    pub fn display_value(&self) -> String {
        match &self.value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// Summary tiles in the order the store sent them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "serde_json::Map<String, serde_json::Value>",
    into = "serde_json::Map<String, serde_json::Value>"
)]
pub struct Summary {
    pub tiles: Vec<SummaryTile>,
}

impl Summary {
    pub fn tile(mut self, label: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.tiles.push(SummaryTile {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    pub fn get(&self, label: &str) -> Option<&serde_json::Value> {
        self.tiles.iter().find(|t| t.label == label).map(|t| &t.value)
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Summary {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Summary {
            tiles: map
                .into_iter()
                .map(|(label, value)| SummaryTile { label, value })
                .collect(),
        }
    }
}

impl From<Summary> for serde_json::Map<String, serde_json::Value> {
    fn from(summary: Summary) -> Self {
        summary
            .tiles
            .into_iter()
            .map(|tile| (tile.label, tile.value))
            .collect()
    }
}

// ============================================
// Create payloads
// ============================================

/// Body of `POST /api/tasks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub task: String,
    #[serde(default, deserialize_with = "nullable")]
    pub project: String,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "nullable")]
    pub due_date: String,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

/// Body of `POST /api/habits`. New habits start with every day unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHabit {
    pub habit: String,
}

/// Body of `POST /api/goals`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGoal {
    pub goal: String,
    #[serde(default, deserialize_with = "nullable")]
    pub action_steps: String,
    #[serde(default, deserialize_with = "nullable")]
    pub progress: i64,
}

/// Body of `POST /api/journal`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJournalEntry {
    #[serde(default, deserialize_with = "nullable")]
    pub date: String,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default, deserialize_with = "nullable")]
    pub stress: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub gratitude: String,
    #[serde(default, deserialize_with = "nullable")]
    pub highlight: String,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_wire_names() {
        let task: Task = serde_json::from_value(json!({
            "id": 4,
            "user_id": 1,
            "task": "Write report",
            "project": null,
            "priority": "high",
            "due_date": "2024-02-01",
            "status": "Not Started"
        }))
        .unwrap();

        assert_eq!(task.title, "Write report");
        assert_eq!(task.project, "");
        assert_eq!(task.priority, Some(Priority::High));
        assert_eq!(task.status, Some(TaskStatus::NotStarted));
    }

    #[test]
    fn test_unknown_label_is_preserved() {
        let status = TaskStatus::from("Blocked");
        assert_eq!(status, TaskStatus::Other("Blocked".to_string()));
        assert_eq!(String::from(status), "Blocked");
    }

    #[test]
    fn test_habit_days_map_to_flags() {
        let habit: Habit = serde_json::from_value(json!({
            "id": 1, "habit": "Meditate",
            "mon": 1, "tue": 1, "wed": 0, "thu": 1, "fri": 1, "sat": 0, "sun": null
        }))
        .unwrap();

        assert_eq!(
            habit.week,
            WeekFlags([true, true, false, true, true, false, false])
        );
        assert_eq!(habit.week.completed(), 4);
        assert_eq!(habit.streak(), 2);

        let value = serde_json::to_value(&habit).unwrap();
        assert_eq!(value["habit"], "Meditate");
        assert_eq!(value["thu"], 1);
        assert_eq!(value["sun"], 0);
    }

    #[test]
    fn test_streak_edges() {
        assert_eq!(WeekFlags::default().streak(), 0);
        assert_eq!(WeekFlags([true; 7]).streak(), 7);
        assert_eq!(
            WeekFlags([true, false, false, false, false, false, false]).streak(),
            1
        );
    }

    #[test]
    fn test_journal_accepts_either_date_key() {
        let from_jdate: JournalEntry =
            serde_json::from_value(json!({"jdate": "2024-01-15", "mood": "Calm", "stress": 3}))
                .unwrap();
        let from_date: JournalEntry =
            serde_json::from_value(json!({"date": "2024-01-15", "mood": "Calm", "stress": 3}))
                .unwrap();

        assert_eq!(from_jdate, from_date);
        assert_eq!(from_jdate.mood, Some(Mood::Calm));
    }

    #[test]
    fn test_summary_keeps_store_order() {
        let summary: Summary = serde_json::from_str(
            r#"{"Tasks Due Today": 2, "Avg. Stress Level": 3.5, "Goals In Progress": 1}"#,
        )
        .unwrap();

        let labels: Vec<&str> = summary.tiles.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Tasks Due Today", "Avg. Stress Level", "Goals In Progress"]
        );
        assert_eq!(summary.tiles[1].display_value(), "3.5");
    }

    #[test]
    fn test_collection_paths() {
        assert_eq!(Collection::Tasks.record_path(7), "/api/tasks/7");
        assert_eq!("Habits".parse::<Collection>(), Ok(Collection::Habits));
        assert!(!Collection::Journal.deletable());
        assert!("notes".parse::<Collection>().is_err());
    }
}
