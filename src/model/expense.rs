use crate::model::{default_category, non_empty, Amount, Record};
use crate::Clock;
use serde::{Deserialize, Serialize};

/// Represents a single spending entry.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Expense {
    pub(crate) amount: Amount,
    #[serde(default = "default_category")]
    pub(crate) category: String,
    #[serde(default)]
    pub(crate) description: String,
    pub(crate) date: String,
    /// Files written before creation stamps were recorded have no `created_at`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) created_at: Option<String>,
}

impl Expense {
    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// The `YYYY-MM` prefix of the date.
    pub fn month(&self) -> String {
        self.date.chars().take(7).collect()
    }

    pub fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

/// The fields needed to add an expense.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewExpense {
    pub amount: Amount,
    /// `None` or empty means `General`.
    pub category: Option<String>,
    pub description: Option<String>,
    /// `None` or empty means today.
    pub date: Option<String>,
}

/// Changes to apply to an expense. Absent or empty text fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseUpdates {
    pub amount: Option<Amount>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
}

impl Record for Expense {
    type New = NewExpense;
    type Updates = ExpenseUpdates;

    fn create(new: NewExpense, clock: &dyn Clock) -> Self {
        Self {
            amount: new.amount,
            category: non_empty(new.category).unwrap_or_else(default_category),
            description: new.description.unwrap_or_default(),
            date: non_empty(new.date).unwrap_or_else(|| clock.today()),
            created_at: Some(clock.timestamp()),
        }
    }

    fn apply(&mut self, updates: ExpenseUpdates) {
        if let Some(amount) = updates.amount {
            self.amount = amount;
        }
        if let Some(category) = non_empty(updates.category) {
            self.category = category;
        }
        if let Some(description) = non_empty(updates.description) {
            self.description = description;
        }
        if let Some(date) = non_empty(updates.date) {
            self.date = date;
        }
    }

    fn category(&self) -> &str {
        &self.category
    }
}
