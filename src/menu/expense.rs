use crate::args::{AddExpenseArgs, DeleteArgs, ListArgs, SummarizeArgs, SummaryKey};
use crate::commands::{self, Out};
use crate::menu::{optional, parse_amount, parse_position, Prompt};
use crate::store::ExpenseStore;
use crate::Result;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::debug;

const MENU: &str = "\nExpense Tracker Menu:\n\
    1. Add Expense\n\
    2. Delete Expense\n\
    3. View All Expenses\n\
    4. Summarize by Category\n\
    5. Summarize by Month\n\
    6. Exit";

/// Runs the expense menu until Exit is chosen or the input closes.
pub async fn run_expense_menu<R, W>(
    store: &mut ExpenseStore,
    currency: &str,
    prompt: &mut Prompt<R, W>,
) -> Result<Out<()>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        prompt.say(MENU).await?;
        let Some(choice) = prompt.ask("Enter choice (1-6): ").await? else {
            break;
        };
        debug!("Expense menu choice '{choice}'");
        let keep_going = match choice.as_str() {
            "1" => add(store, currency, prompt).await?,
            "2" => delete(store, currency, prompt).await?,
            "3" => {
                let out = commands::list_expenses(store, currency, ListArgs::default());
                prompt.say(out.message()).await?;
                true
            }
            "4" | "5" => {
                let by = if choice == "4" {
                    SummaryKey::Category
                } else {
                    SummaryKey::Month
                };
                let out = commands::summarize_expenses(store, currency, SummarizeArgs::new(by));
                prompt.say(out.message()).await?;
                true
            }
            "6" => false,
            _ => {
                prompt.say("Invalid choice. Please try again.").await?;
                true
            }
        };
        if !keep_going {
            break;
        }
    }
    Ok("Exiting Expense Tracker.".into())
}

async fn add<R, W>(
    store: &mut ExpenseStore,
    currency: &str,
    prompt: &mut Prompt<R, W>,
) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let Some(answer) = prompt.ask("Enter amount: ").await? else {
        return Ok(false);
    };
    // Bad amounts are reported before asking for anything else.
    let amount = match parse_amount(&answer).and_then(commands::check_amount) {
        Ok(amount) => amount,
        Err(e) => {
            prompt.report::<String>(Err(e)).await?;
            return Ok(true);
        }
    };
    let Some(category) = prompt
        .ask("Enter category (e.g., Food, Transport, Bills): ")
        .await?
    else {
        return Ok(false);
    };
    let Some(description) = prompt.ask("Enter description (optional): ").await? else {
        return Ok(false);
    };
    let Some(date) = prompt
        .ask("Enter date (YYYY-MM-DD, press Enter for today): ")
        .await?
    else {
        return Ok(false);
    };
    let args = AddExpenseArgs::new(
        amount,
        optional(category),
        optional(description),
        optional(date),
    );
    let outcome = commands::add_expense(store, currency, args)
        .await
        .map(|out| out.message().to_string());
    prompt.report(outcome).await?;
    Ok(true)
}

async fn delete<R, W>(
    store: &mut ExpenseStore,
    currency: &str,
    prompt: &mut Prompt<R, W>,
) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    prompt
        .say(commands::list_expenses(store, currency, ListArgs::default()).message())
        .await?;
    let Some(answer) = prompt.ask("Enter expense number to delete: ").await? else {
        return Ok(false);
    };
    let outcome = match parse_position(&answer) {
        Ok(position) => commands::delete_expense(store, currency, DeleteArgs::new(position))
            .await
            .map(|out| out.message().to_string()),
        Err(e) => Err(e),
    };
    prompt.report(outcome).await?;
    Ok(true)
}
