//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::config::Settings;
use crate::model::{Amount, NewExpense, NewTask};
use crate::store::{ExpenseStore, TaskStore};
use crate::{Config, FixedClock};
use std::str::FromStr;
use tempfile::TempDir;

/// The instant every store in a `TestEnv` sees as "now".
pub const NOW: &str = "2024-03-09 14:05:00";

/// Test environment that sets up a tally home directory with a Config.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment with a default Config.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("tally");
        let config = Config::create(&root, Settings::default()).await.unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    pub fn clock(&self) -> FixedClock {
        FixedClock::parse(NOW).unwrap()
    }

    /// Loads the to-do store from the config's data file.
    pub async fn task_store(&self) -> TaskStore {
        TaskStore::load(self.config.todo_path(), self.clock())
            .await
            .unwrap()
    }

    /// Loads the expense store from the config's data file.
    pub async fn expense_store(&self) -> ExpenseStore {
        ExpenseStore::load(self.config.expense_path(), self.clock())
            .await
            .unwrap()
    }

    /// Adds one task per `(description, category)` pair and returns the store.
    pub async fn with_tasks(&self, tasks: &[(&str, &str)]) -> TaskStore {
        let mut store = self.task_store().await;
        for (description, category) in tasks {
            store
                .add(NewTask {
                    description: description.to_string(),
                    category: Some(category.to_string()),
                    due_date: None,
                })
                .await
                .unwrap();
        }
        store
    }

    /// Adds one expense per `(amount, category, date)` triple and returns the store.
    pub async fn with_expenses(&self, expenses: &[(&str, &str, &str)]) -> ExpenseStore {
        let mut store = self.expense_store().await;
        for (amount, category, date) in expenses {
            store
                .add(NewExpense {
                    amount: Amount::from_str(amount).unwrap(),
                    category: Some(category.to_string()),
                    description: Some(format!("{category} item")),
                    date: Some(date.to_string()),
                })
                .await
                .unwrap();
        }
        store
    }
}
