//! Dashboard input forms
//!
//! Raw input values as typed by the user. Each form turns itself into a
//! create payload (presence and number checks only) and knows which of its
//! fields are cleared after a successful submit.
//!
//! Dashboard pages name their inputs after the form fields, so a host can
//! collect a submitted form by input name with [`DashboardForm::from_fields`].

use chrono::Local;

use super::error::ValidationError;
use super::types::{
    Collection, Mood, NewGoal, NewHabit, NewJournalEntry, NewTask, Priority, TaskStatus,
};

/// Project given to tasks added from the quick-add card
pub const QUICK_ADD_PROJECT: &str = "Quick Add";

/// Require a non-blank text field, returning it trimmed
fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parse an integer input; blank means zero
fn whole_number(field: &'static str, value: &str) -> Result<i64, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidNumber {
            field,
            value: trimmed.to_string(),
        })
}

/// Add-task form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub project: String,
    pub priority: Priority,
    pub due_date: String,
    pub status: TaskStatus,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            project: String::new(),
            priority: Priority::Medium,
            due_date: String::new(),
            status: TaskStatus::NotStarted,
        }
    }
}

impl TaskForm {
    /// Quick-add task: medium priority, due today
    pub fn quick(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            project: QUICK_ADD_PROJECT.to_string(),
            due_date: Local::now().date_naive().to_string(),
            ..Default::default()
        }
    }

    pub fn to_payload(&self) -> Result<NewTask, ValidationError> {
        Ok(NewTask {
            task: required("title", &self.title)?,
            project: self.project.trim().to_string(),
            priority: Some(self.priority.clone()),
            due_date: self.due_date.trim().to_string(),
            status: Some(self.status.clone()),
        })
    }

    /// Priority and status selections survive a submit
    pub fn clear(&mut self) {
        self.title.clear();
        self.project.clear();
        self.due_date.clear();
    }
}

/// Add-habit form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitForm {
    pub name: String,
}

impl HabitForm {
    pub fn to_payload(&self) -> Result<NewHabit, ValidationError> {
        Ok(NewHabit {
            habit: required("name", &self.name)?,
        })
    }

    pub fn clear(&mut self) {
        self.name.clear();
    }
}

/// Add-goal form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalForm {
    pub title: String,
    pub action_steps: String,
    pub progress: String,
}

impl GoalForm {
    pub fn to_payload(&self) -> Result<NewGoal, ValidationError> {
        let title = required("title", &self.title)?;
        let progress = whole_number("progress", &self.progress)?;
        if !(0..=100).contains(&progress) {
            return Err(ValidationError::OutOfRange {
                field: "progress",
                value: progress,
                min: 0,
                max: 100,
            });
        }

        Ok(NewGoal {
            goal: title,
            action_steps: self.action_steps.trim().to_string(),
            progress,
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Journal form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalForm {
    pub date: String,
    pub mood: Option<Mood>,
    pub stress: String,
    pub gratitude: String,
    pub highlight: String,
    pub notes: String,
}

impl JournalForm {
    /// Stress is any whole number; the date identifies the entry and is required
    pub fn to_payload(&self) -> Result<NewJournalEntry, ValidationError> {
        Ok(NewJournalEntry {
            date: required("date", &self.date)?,
            mood: self.mood.clone(),
            stress: whole_number("stress", &self.stress)?,
            gratitude: self.gratitude.trim().to_string(),
            highlight: self.highlight.trim().to_string(),
            notes: self.notes.trim().to_string(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A submitted dashboard form, one variant per creatable collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardForm {
    Task(TaskForm),
    Habit(HabitForm),
    Goal(GoalForm),
    Journal(JournalForm),
}

impl DashboardForm {
    /// Input names carried by the add form for a collection
    pub fn field_names(collection: Collection) -> &'static [&'static str] {
        match collection {
            Collection::Tasks => &["title", "project", "priority", "due_date", "status"],
            Collection::Habits => &["name"],
            Collection::Goals => &["title", "action_steps", "progress"],
            Collection::Journal => &["date", "mood", "stress", "gratitude", "highlight", "notes"],
            Collection::Summary => &[],
        }
    }

    /// Collect an add form from its named inputs. Missing inputs read as
    /// blank. `None` for the summary, which has no form.
    pub fn from_fields<F>(collection: Collection, field: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |name: &str| field(name).unwrap_or_default();
        let form = match collection {
            Collection::Tasks => {
                let mut form = TaskForm {
                    title: text("title"),
                    project: text("project"),
                    due_date: text("due_date"),
                    ..Default::default()
                };
                if let Some(priority) = field("priority").filter(|p| !p.trim().is_empty()) {
                    form.priority = priority.into();
                }
                if let Some(status) = field("status").filter(|s| !s.trim().is_empty()) {
                    form.status = status.into();
                }
                DashboardForm::Task(form)
            }
            Collection::Habits => DashboardForm::Habit(HabitForm { name: text("name") }),
            Collection::Goals => DashboardForm::Goal(GoalForm {
                title: text("title"),
                action_steps: text("action_steps"),
                progress: text("progress"),
            }),
            Collection::Journal => DashboardForm::Journal(JournalForm {
                date: text("date"),
                mood: field("mood")
                    .filter(|m| !m.trim().is_empty())
                    .map(Mood::from),
                stress: text("stress"),
                gratitude: text("gratitude"),
                highlight: text("highlight"),
                notes: text("notes"),
            }),
            Collection::Summary => return None,
        };
        Some(form)
    }

    /// Collect a quick-add input. Only tasks and habits have one.
    pub fn quick<F>(collection: Collection, field: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match collection {
            Collection::Tasks => Some(DashboardForm::Task(TaskForm::quick(
                field("title").unwrap_or_default(),
            ))),
            Collection::Habits => Some(DashboardForm::Habit(HabitForm {
                name: field("name").unwrap_or_default(),
            })),
            _ => None,
        }
    }

    pub fn collection(&self) -> Collection {
        match self {
            DashboardForm::Task(_) => Collection::Tasks,
            DashboardForm::Habit(_) => Collection::Habits,
            DashboardForm::Goal(_) => Collection::Goals,
            DashboardForm::Journal(_) => Collection::Journal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_form_requires_title() {
        let form = TaskForm {
            title: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            form.to_payload(),
            Err(ValidationError::MissingField("title"))
        );
    }

    #[test]
    fn test_task_form_clear_keeps_selections() {
        let mut form = TaskForm {
            title: "Write report".to_string(),
            project: "Docs".to_string(),
            priority: Priority::High,
            due_date: "2024-02-01".to_string(),
            status: TaskStatus::InProgress,
        };

        let payload = form.to_payload().unwrap();
        assert_eq!(payload.task, "Write report");
        assert_eq!(payload.priority, Some(Priority::High));

        form.clear();
        assert!(form.title.is_empty() && form.project.is_empty() && form.due_date.is_empty());
        assert_eq!(form.priority, Priority::High);
        assert_eq!(form.status, TaskStatus::InProgress);
    }

    #[test]
    fn test_goal_progress_parsing() {
        let mut form = GoalForm {
            title: "Read 12 Books".to_string(),
            action_steps: String::new(),
            progress: String::new(),
        };
        assert_eq!(form.to_payload().unwrap().progress, 0);

        form.progress = "abc".to_string();
        assert!(matches!(
            form.to_payload(),
            Err(ValidationError::InvalidNumber { field: "progress", .. })
        ));

        form.progress = "101".to_string();
        assert!(matches!(
            form.to_payload(),
            Err(ValidationError::OutOfRange { value: 101, .. })
        ));

        form.progress = " 40 ".to_string();
        assert_eq!(form.to_payload().unwrap().progress, 40);
    }

    #[test]
    fn test_journal_stress_is_unconstrained() {
        let form = JournalForm {
            date: "2024-01-15".to_string(),
            stress: "-4".to_string(),
            ..Default::default()
        };
        assert_eq!(form.to_payload().unwrap().stress, -4);

        let undated = JournalForm::default();
        assert_eq!(undated.to_payload(), Err(ValidationError::MissingField("date")));
    }

    #[test]
    fn test_habit_form() {
        let mut form = HabitForm {
            name: " Stretch ".to_string(),
        };
        assert_eq!(form.to_payload().unwrap().habit, "Stretch");
        form.clear();
        assert_eq!(form.to_payload(), Err(ValidationError::MissingField("name")));
    }

    #[test]
    fn test_quick_task_defaults() {
        let form = TaskForm::quick("Call plumber");
        let payload = form.to_payload().unwrap();

        assert_eq!(payload.project, QUICK_ADD_PROJECT);
        assert_eq!(payload.priority, Some(Priority::Medium));
        assert_eq!(payload.status, Some(TaskStatus::NotStarted));
        assert_eq!(payload.due_date, Local::now().date_naive().to_string());
    }

    #[test]
    fn test_form_from_named_inputs() {
        let inputs = |name: &str| match name {
            "title" => Some("Ship beta".to_string()),
            "priority" => Some("High".to_string()),
            "status" => Some(String::new()),
            _ => None,
        };

        let form = DashboardForm::from_fields(Collection::Tasks, inputs).unwrap();

        assert_eq!(form.collection(), Collection::Tasks);
        let DashboardForm::Task(task) = form else {
            panic!("expected a task form");
        };
        assert_eq!(task.title, "Ship beta");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.status, TaskStatus::NotStarted);
        assert!(task.project.is_empty());
    }

    #[test]
    fn test_summary_has_no_form() {
        assert!(DashboardForm::from_fields(Collection::Summary, |_| None).is_none());
        assert!(DashboardForm::quick(Collection::Goals, |_| None).is_none());
        assert!(DashboardForm::field_names(Collection::Summary).is_empty());
    }
}
