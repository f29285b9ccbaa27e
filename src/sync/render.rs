//! Table rendering
//!
//! Turns a fetched collection into the render tree mounted in its dashboard
//! container. Record text always goes into text nodes, never into markup.

use crate::view::{el, Action, Element, Event, Node};

use super::types::{Collection, Goal, Habit, JournalEntry, RecordId, Summary, Task};

fn cell(content: impl Into<String>) -> Element {
    el("td").text(content)
}

fn delete_cell(collection: Collection, id: RecordId) -> Element {
    el("td").child(
        el("button")
            .class("btn-danger")
            .on(Event::Click, Action::Delete { collection, id })
            .text("Delete"),
    )
}

fn label_or_blank<T: AsRef<str>>(value: Option<T>) -> String {
    value.map(|v| v.as_ref().to_string()).unwrap_or_default()
}

/// Body of `#tasksTable`
pub fn tasks_body(tasks: &[Task]) -> Node {
    el("tbody")
        .children(tasks.iter().map(|task| {
            el("tr")
                .attr("data-id", task.id.to_string())
                .child(cell(task.id.to_string()))
                .child(cell(task.title.as_str()))
                .child(cell(task.project.as_str()))
                .child(cell(label_or_blank(task.priority.as_ref().map(|p| p.label()))))
                .child(cell(task.due_date.as_str()))
                .child(cell(label_or_blank(task.status.as_ref().map(|s| s.label()))))
                .child(delete_cell(Collection::Tasks, task.id))
        }))
        .into()
}

/// Body of `#habitsTable`: name, one 1/0 cell per weekday, then delete
pub fn habits_body(habits: &[Habit]) -> Node {
    el("tbody")
        .children(habits.iter().map(|habit| {
            el("tr")
                .attr("data-id", habit.id.to_string())
                .attr("data-streak", habit.streak().to_string())
                .child(cell(habit.name.as_str()))
                .children(
                    habit
                        .week
                        .0
                        .iter()
                        .map(|done| cell(if *done { "1" } else { "0" })),
                )
                .child(delete_cell(Collection::Habits, habit.id))
        }))
        .into()
}

/// Body of `#goalsTable`
pub fn goals_body(goals: &[Goal]) -> Node {
    el("tbody")
        .children(goals.iter().map(|goal| {
            el("tr")
                .attr("data-id", goal.id.to_string())
                .child(cell(goal.title.as_str()))
                .child(cell(goal.action_steps.as_str()))
                .child(cell(goal.progress.to_string()))
                .child(delete_cell(Collection::Goals, goal.id))
        }))
        .into()
}

/// Body of `#journalTable`. Journal entries have no delete control.
pub fn journal_body(entries: &[JournalEntry]) -> Node {
    el("tbody")
        .children(entries.iter().map(|entry| {
            el("tr")
                .child(cell(entry.date.as_str()))
                .child(cell(label_or_blank(entry.mood.as_ref().map(|m| m.label()))))
                .child(cell(
                    entry.stress.map(|s| s.to_string()).unwrap_or_default(),
                ))
                .child(cell(entry.gratitude.as_str()))
                .child(cell(entry.highlight.as_str()))
                .child(cell(entry.notes.as_str()))
        }))
        .into()
}

/// Contents of `#kpis`: one tile per summary entry, in the store's order
pub fn summary_tiles(summary: &Summary) -> Node {
    el("div")
        .class("kpis")
        .children(summary.tiles.iter().map(|tile| {
            el("div")
                .class("kpi")
                .child(el("div").class("label").text(tile.label.as_str()))
                .child(el("div").class("value").text(tile.display_value()))
        }))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::types::{Mood, Priority, TaskStatus, WeekFlags};

    #[test]
    fn test_task_row_cells() {
        let body = tasks_body(&[Task {
            id: 7,
            title: "Write <report>".to_string(),
            project: "Work".to_string(),
            priority: Some(Priority::High),
            due_date: "2025-06-01".to_string(),
            status: Some(TaskStatus::InProgress),
        }]);

        let row = body.as_element().unwrap().children[0].text_content();
        assert_eq!(row, "7Write <report>WorkHigh2025-06-01In ProgressDelete");
        assert!(body.to_html().contains("Write &lt;report&gt;"));
        assert_eq!(
            body.listeners()[0].action,
            Action::Delete {
                collection: Collection::Tasks,
                id: 7
            }
        );
    }

    #[test]
    fn test_habit_day_cells() {
        let body = habits_body(&[Habit {
            id: 2,
            name: "Meditate".to_string(),
            week: WeekFlags([true, true, false, false, true, false, false]),
        }]);

        let row = body.as_element().unwrap().children[0].as_element().unwrap();
        let days: Vec<String> = row.children[1..8].iter().map(Node::text_content).collect();
        assert_eq!(days, vec!["1", "1", "0", "0", "1", "0", "0"]);
        assert_eq!(row.get_attr("data-streak"), Some("1"));
    }

    #[test]
    fn test_journal_has_no_delete() {
        let body = journal_body(&[JournalEntry {
            id: None,
            date: "2025-06-01".to_string(),
            mood: Some(Mood::Calm),
            stress: Some(4),
            gratitude: "Sunshine".to_string(),
            highlight: String::new(),
            notes: String::new(),
        }]);

        assert!(body.listeners().is_empty());
        assert!(body.text_content().starts_with("2025-06-01Calm4Sunshine"));
    }

    #[test]
    fn test_summary_tiles_keep_order() {
        let summary = Summary::default()
            .tile("Tasks Due Today", 2)
            .tile("Avg. Stress Level", 3.5)
            .tile("Note", "ok");

        let tiles = summary_tiles(&summary);
        let labels: Vec<String> = tiles
            .find_by_class("label")
            .into_iter()
            .map(|e| Node::Element(e.clone()).text_content())
            .collect();
        assert_eq!(labels, vec!["Tasks Due Today", "Avg. Stress Level", "Note"]);
        assert!(tiles.text_content().ends_with("Noteok"));
    }

    #[test]
    fn test_empty_collection_renders_empty_body() {
        assert_eq!(tasks_body(&[]), Node::Element(el("tbody")));
    }
}
