//! Types that represent the core data model, such as `Task` and `Expense`.
mod amount;
mod expense;
mod task;

use crate::Clock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

pub use amount::{Amount, AmountError};
pub use expense::{Expense, ExpenseUpdates, NewExpense};
pub use task::{NewTask, Task, TaskUpdates};

/// The category given to records that were created or stored without one.
pub const DEFAULT_CATEGORY: &str = "General";

/// A row that can live in a `Store`.
pub trait Record: Serialize + DeserializeOwned + Clone + Debug + Send + Sync {
    /// The fields a caller supplies to create a record.
    type New;

    /// A partial set of fields to change on an existing record.
    type Updates;

    /// Builds a record, taking the creation timestamp and any date defaults from `clock`.
    fn create(new: Self::New, clock: &dyn Clock) -> Self;

    /// Applies the fields present in `updates`, leaving the rest untouched.
    fn apply(&mut self, updates: Self::Updates);

    fn category(&self) -> &str;
}

/// Case-insensitive category comparison used by filtered listings.
pub fn category_matches(category: &str, filter: &str) -> bool {
    category.to_lowercase() == filter.to_lowercase()
}

pub(crate) fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// `None` and `Some("")` both mean "no value given".
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_matches_ignores_case() {
        assert!(category_matches("Work", "work"));
        assert!(category_matches("WORK", "Work"));
        assert!(!category_matches("Work", "Home"));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("x".into())), Some("x".to_string()));
    }
}
