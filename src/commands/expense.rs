//! Expense command handlers.
//!
//! `currency` is printed in front of every amount, e.g. `Ksh12.50`.

use crate::args::{
    AddExpenseArgs, DeleteArgs, ListArgs, SummarizeArgs, SummaryKey, UpdateExpenseArgs,
};
use crate::commands::Out;
use crate::error::{Error, ErrorType};
use crate::model::{Amount, Expense, Record};
use crate::store::{Entry, ExpenseStore, Listing, Total};
use crate::Result;

/// Rejects amounts that can never be spent.
///
/// # Errors
/// - `DomainValidation` if `amount` is below zero.
pub fn check_amount(amount: Amount) -> Result<Amount> {
    if amount.is_negative() {
        return Err(Error::msg(
            ErrorType::DomainValidation,
            "Amount cannot be negative.",
        ));
    }
    Ok(amount)
}

/// Records an expense at the end of the list. A missing date means today.
///
/// # Errors
/// - `DomainValidation` if the amount is negative. The store is not touched.
pub async fn add_expense(
    store: &mut ExpenseStore,
    currency: &str,
    args: AddExpenseArgs,
) -> Result<Out<Expense>> {
    check_amount(args.amount())?;
    let expense = store.add(args.into()).await?.clone();
    let message = format!(
        "Expense of {currency}{} added to category '{}'.",
        expense.amount(),
        expense.category()
    );
    Ok(Out::new(message, expense))
}

/// Removes the expense at the given position. Later expenses move up by one.
///
/// # Errors
/// - `OutOfRange` if there is no expense at the position.
pub async fn delete_expense(
    store: &mut ExpenseStore,
    currency: &str,
    args: DeleteArgs,
) -> Result<Out<Expense>> {
    let expense = store.delete(args.position()).await?;
    let message = format!(
        "Expense of {currency}{} ({}) deleted.",
        expense.amount(),
        expense.description()
    );
    Ok(Out::new(message, expense))
}

/// Applies the given field changes to the expense at the given position.
///
/// # Errors
/// - `DomainValidation` if a new amount is negative.
/// - `OutOfRange` if there is no expense at the position.
pub async fn update_expense(
    store: &mut ExpenseStore,
    args: UpdateExpenseArgs,
) -> Result<Out<Expense>> {
    let updates = args.updates();
    if let Some(amount) = updates.amount {
        check_amount(amount)?;
    }
    let position = args.position();
    let expense = store.update(position, updates).await?.clone();
    Ok(Out::new(format!("Expense {position} updated."), expense))
}

/// Lists every expense, or the expenses in one category.
pub fn list_expenses(
    store: &ExpenseStore,
    currency: &str,
    args: ListArgs,
) -> Out<Vec<Entry<Expense>>> {
    match store.list(args.category()) {
        Listing::Empty => Out::new("No expenses found.", Vec::new()),
        Listing::NoMatch(category) => Out::new(
            format!("No expenses found in category '{category}'."),
            Vec::new(),
        ),
        Listing::Entries(entries) => {
            let lines: Vec<String> = entries
                .iter()
                .map(|e| {
                    format!(
                        "{}. {currency}{} - {} - {} (Date: {})",
                        e.position,
                        e.record.amount(),
                        e.record.category(),
                        e.record.description(),
                        e.record.date()
                    )
                })
                .collect();
            let owned = entries
                .into_iter()
                .map(|e| Entry {
                    position: e.position,
                    record: e.record.clone(),
                })
                .collect();
            Out::new(lines.join("\n"), owned)
        }
    }
}

/// Totals spending per category (first-seen order) or per month (oldest first).
pub fn summarize_expenses(
    store: &ExpenseStore,
    currency: &str,
    args: SummarizeArgs,
) -> Out<Vec<Total>> {
    if store.is_empty() {
        return Out::new("No expenses to summarize.", Vec::new());
    }
    let (title, totals) = match args.by() {
        SummaryKey::Category => ("Expense Summary by Category:", store.totals_by_category()),
        SummaryKey::Month => ("Expense Summary by Month:", store.totals_by_month()),
    };
    let mut lines = vec![title.to_string()];
    lines.extend(
        totals
            .iter()
            .map(|t| format!("{}: {currency}{}", t.key, t.total)),
    );
    Out::new(lines.join("\n"), totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExpenseUpdates;
    use crate::test::TestEnv;
    use std::str::FromStr;

    fn amount(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[tokio::test]
    async fn test_add_expense_defaults_date_to_today() {
        let env = TestEnv::new().await;
        let mut store = env.expense_store().await;
        let args = AddExpenseArgs::new(amount("1250"), Some("Rent".into()), None, None);
        let out = add_expense(&mut store, "Ksh", args).await.unwrap();
        assert_eq!(
            out.message(),
            "Expense of Ksh1,250.00 added to category 'Rent'."
        );
        assert_eq!(out.structure().unwrap().date(), "2024-03-09");
    }

    #[tokio::test]
    async fn test_add_negative_expense_is_rejected() {
        let env = TestEnv::new().await;
        let mut store = env.expense_store().await;
        let args = AddExpenseArgs::new(amount("-1"), None, None, None);
        let err = add_expense(&mut store, "Ksh", args).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::DomainValidation);
        assert_eq!(err.to_string(), "Amount cannot be negative.");
        assert!(store.is_empty());
        assert!(!env.config().expense_path().exists());
    }

    #[tokio::test]
    async fn test_delete_expense_message() {
        let env = TestEnv::new().await;
        let mut store = env
            .with_expenses(&[("10", "Food", "2024-01-01"), ("5", "Bus", "2024-01-02")])
            .await;
        let out = delete_expense(&mut store, "$", DeleteArgs::new(1))
            .await
            .unwrap();
        assert_eq!(out.message(), "Expense of $10.00 (Food item) deleted.");
        assert_eq!(store.get(1).unwrap().category(), "Bus");
    }

    #[tokio::test]
    async fn test_update_expense() {
        let env = TestEnv::new().await;
        let mut store = env.with_expenses(&[("10", "Food", "2024-01-01")]).await;
        let updates = ExpenseUpdates {
            amount: Some(amount("12.75")),
            ..Default::default()
        };
        let out = update_expense(&mut store, UpdateExpenseArgs::new(1, updates))
            .await
            .unwrap();
        assert_eq!(out.message(), "Expense 1 updated.");
        assert_eq!(env.expense_store().await.get(1).unwrap().amount(), amount("12.75"));
    }

    #[tokio::test]
    async fn test_update_expense_negative_amount() {
        let env = TestEnv::new().await;
        let mut store = env.with_expenses(&[("10", "Food", "2024-01-01")]).await;
        let updates = ExpenseUpdates {
            amount: Some(amount("-3")),
            ..Default::default()
        };
        let err = update_expense(&mut store, UpdateExpenseArgs::new(1, updates))
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::DomainValidation);
        assert_eq!(store.get(1).unwrap().amount(), amount("10"));
    }

    #[tokio::test]
    async fn test_list_expenses() {
        let env = TestEnv::new().await;
        let store = env
            .with_expenses(&[("10", "Food", "2024-01-01"), ("5.5", "Bus", "2024-01-02")])
            .await;
        let out = list_expenses(&store, "Ksh", ListArgs::default());
        assert_eq!(
            out.message(),
            "1. Ksh10.00 - Food - Food item (Date: 2024-01-01)\n\
             2. Ksh5.50 - Bus - Bus item (Date: 2024-01-02)"
        );

        let out = list_expenses(&store, "Ksh", ListArgs::new(Some("bus".into())));
        assert_eq!(
            out.message(),
            "2. Ksh5.50 - Bus - Bus item (Date: 2024-01-02)"
        );

        let out = list_expenses(&store, "Ksh", ListArgs::new(Some("Rent".into())));
        assert_eq!(out.message(), "No expenses found in category 'Rent'.");
    }

    #[tokio::test]
    async fn test_summarize_by_category() {
        let env = TestEnv::new().await;
        let store = env
            .with_expenses(&[
                ("10", "A", "2024-02-01"),
                ("5", "B", "2024-01-15"),
                ("3", "A", "2024-01-20"),
            ])
            .await;
        let out = summarize_expenses(&store, "Ksh", SummarizeArgs::new(SummaryKey::Category));
        assert_eq!(
            out.message(),
            "Expense Summary by Category:\nA: Ksh13.00\nB: Ksh5.00"
        );
    }

    #[tokio::test]
    async fn test_summarize_by_month() {
        let env = TestEnv::new().await;
        let store = env
            .with_expenses(&[
                ("10", "A", "2024-02-01"),
                ("5", "B", "2024-01-15"),
                ("3", "A", "2024-01-20"),
            ])
            .await;
        let out = summarize_expenses(&store, "Ksh", SummarizeArgs::new(SummaryKey::Month));
        assert_eq!(
            out.message(),
            "Expense Summary by Month:\n2024-01: Ksh8.00\n2024-02: Ksh10.00"
        );
    }

    #[tokio::test]
    async fn test_summarize_empty() {
        let env = TestEnv::new().await;
        let store = env.expense_store().await;
        let out = summarize_expenses(&store, "Ksh", SummarizeArgs::new(SummaryKey::Month));
        assert_eq!(out.message(), "No expenses to summarize.");
    }
}
