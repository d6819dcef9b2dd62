use crate::model::{default_category, non_empty, Record};
use crate::Clock;
use serde::{Deserialize, Serialize};

/// Represents a single entry of the to-do list.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Task {
    pub(crate) description: String,
    #[serde(default = "default_category")]
    pub(crate) category: String,
    #[serde(default)]
    pub(crate) due_date: Option<String>,
    #[serde(default)]
    pub(crate) completed: bool,
    pub(crate) created_at: String,
}

impl Task {
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn due_date(&self) -> Option<&str> {
        self.due_date.as_deref()
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }
}

/// The fields needed to add a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub description: String,
    /// `None` or empty means `General`.
    pub category: Option<String>,
    pub due_date: Option<String>,
}

/// Changes to apply to a task. Absent or empty text fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdates {
    pub description: Option<String>,
    pub category: Option<String>,
    pub due_date: Option<String>,
    /// `None` leaves the flag alone, `Some(_)` sets it.
    pub completed: Option<bool>,
}

impl Record for Task {
    type New = NewTask;
    type Updates = TaskUpdates;

    fn create(new: NewTask, clock: &dyn Clock) -> Self {
        Self {
            description: new.description,
            category: non_empty(new.category).unwrap_or_else(default_category),
            due_date: non_empty(new.due_date),
            completed: false,
            created_at: clock.timestamp(),
        }
    }

    fn apply(&mut self, updates: TaskUpdates) {
        if let Some(description) = non_empty(updates.description) {
            self.description = description;
        }
        if let Some(category) = non_empty(updates.category) {
            self.category = category;
        }
        if let Some(due_date) = non_empty(updates.due_date) {
            self.due_date = Some(due_date);
        }
        if let Some(completed) = updates.completed {
            self.completed = completed;
        }
    }

    fn category(&self) -> &str {
        &self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedClock;

    fn clock() -> FixedClock {
        FixedClock::parse("2024-05-01 08:30:00").unwrap()
    }

    #[test]
    fn test_create_defaults() {
        let task = Task::create(
            NewTask {
                description: "Water plants".into(),
                category: Some(String::new()),
                due_date: None,
            },
            &clock(),
        );
        assert_eq!(task.category(), "General");
        assert_eq!(task.due_date(), None);
        assert!(!task.completed());
        assert_eq!(task.created_at(), "2024-05-01 08:30:00");
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let json = r#"{"description": "Call mom", "created_at": "2024-01-01 10:00:00"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.description(), "Call mom");
        assert_eq!(task.category(), "General");
        assert_eq!(task.due_date(), None);
        assert!(!task.completed());
    }

    #[test]
    fn test_deserialize_requires_created_at() {
        let json = r#"{"description": "Call mom"}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn test_serialize_key_order_and_null_due_date() {
        let task = Task::create(
            NewTask {
                description: "Pay rent".into(),
                category: Some("Home".into()),
                due_date: None,
            },
            &clock(),
        );
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(
            json,
            r#"{"description":"Pay rent","category":"Home","due_date":null,"completed":false,"created_at":"2024-05-01 08:30:00"}"#
        );
    }

    #[test]
    fn test_apply_only_present_fields() {
        let mut task = Task::create(
            NewTask {
                description: "Pay rent".into(),
                category: Some("Home".into()),
                due_date: Some("2024-06-01".into()),
            },
            &clock(),
        );
        task.apply(TaskUpdates {
            description: Some(String::new()),
            category: Some("Bills".into()),
            ..Default::default()
        });
        assert_eq!(task.description(), "Pay rent");
        assert_eq!(task.category(), "Bills");
        assert_eq!(task.due_date(), Some("2024-06-01"));
        assert!(!task.completed());
    }

    #[test]
    fn test_apply_completed_tri_state() {
        let mut task = Task::create(
            NewTask {
                description: "x".into(),
                ..Default::default()
            },
            &clock(),
        );
        task.apply(TaskUpdates {
            completed: Some(true),
            ..Default::default()
        });
        assert!(task.completed());
        task.apply(TaskUpdates::default());
        assert!(task.completed());
        task.apply(TaskUpdates {
            completed: Some(false),
            ..Default::default()
        });
        assert!(!task.completed());
    }
}
