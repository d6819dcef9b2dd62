use crate::args::{AddTaskArgs, DeleteArgs, ListArgs, UpdateTaskArgs};
use crate::commands::{self, Out};
use crate::menu::{optional, parse_position, parse_yes_no, Prompt};
use crate::model::TaskUpdates;
use crate::store::TaskStore;
use crate::Result;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::debug;

const MENU: &str = "\nTodo List Menu:\n\
    1. Add Task\n\
    2. Delete Task\n\
    3. Update Task\n\
    4. View All Tasks\n\
    5. View Tasks by Category\n\
    6. Exit";

/// Runs the to-do menu until Exit is chosen or the input closes.
pub async fn run_todo_menu<R, W>(
    store: &mut TaskStore,
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
        debug!("Todo menu choice '{choice}'");
        let keep_going = match choice.as_str() {
            "1" => add(store, prompt).await?,
            "2" => delete(store, prompt).await?,
            "3" => update(store, prompt).await?,
            "4" => {
                let out = commands::list_tasks(store, ListArgs::default());
                prompt.say(out.message()).await?;
                true
            }
            "5" => view_category(store, prompt).await?,
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
    Ok("Exiting Todo List.".into())
}

/// Each step returns `false` when the input closed partway through.
async fn add<R, W>(store: &mut TaskStore, prompt: &mut Prompt<R, W>) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let Some(description) = prompt.ask("Enter task description: ").await? else {
        return Ok(false);
    };
    let Some(category) = prompt
        .ask("Enter category (e.g., Work, Personal, School, press Enter for General): ")
        .await?
    else {
        return Ok(false);
    };
    let Some(due_date) = prompt.ask("Enter due date (YYYY-MM-DD, optional): ").await? else {
        return Ok(false);
    };
    let args = AddTaskArgs::new(description, optional(category), optional(due_date));
    let outcome = commands::add_task(store, args)
        .await
        .map(|out| out.message().to_string());
    prompt.report(outcome).await?;
    Ok(true)
}

async fn delete<R, W>(store: &mut TaskStore, prompt: &mut Prompt<R, W>) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    prompt
        .say(commands::list_tasks(store, ListArgs::default()).message())
        .await?;
    let Some(answer) = prompt.ask("Enter task number to delete: ").await? else {
        return Ok(false);
    };
    let outcome = match parse_position(&answer) {
        Ok(position) => commands::delete_task(store, DeleteArgs::new(position))
            .await
            .map(|out| out.message().to_string()),
        Err(e) => Err(e),
    };
    prompt.report(outcome).await?;
    Ok(true)
}

async fn update<R, W>(store: &mut TaskStore, prompt: &mut Prompt<R, W>) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    prompt
        .say(commands::list_tasks(store, ListArgs::default()).message())
        .await?;
    let Some(answer) = prompt.ask("Enter task number to update: ").await? else {
        return Ok(false);
    };
    let position = match parse_position(&answer) {
        Ok(position) => position,
        Err(e) => {
            prompt.report::<String>(Err(e)).await?;
            return Ok(true);
        }
    };
    let Some(description) = prompt.ask("New description (press Enter to skip): ").await? else {
        return Ok(false);
    };
    let Some(category) = prompt.ask("New category (press Enter to skip): ").await? else {
        return Ok(false);
    };
    let Some(due_date) = prompt
        .ask("New due date (YYYY-MM-DD, press Enter to skip): ")
        .await?
    else {
        return Ok(false);
    };
    let Some(completed) = prompt
        .ask("Mark as completed? (yes/no, press Enter to skip): ")
        .await?
    else {
        return Ok(false);
    };
    let updates = TaskUpdates {
        description: optional(description),
        category: optional(category),
        due_date: optional(due_date),
        completed: parse_yes_no(&completed),
    };
    let outcome = commands::update_task(store, UpdateTaskArgs::new(position, updates))
        .await
        .map(|out| out.message().to_string());
    prompt.report(outcome).await?;
    Ok(true)
}

async fn view_category<R, W>(store: &TaskStore, prompt: &mut Prompt<R, W>) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let Some(category) = prompt
        .ask("Enter category to filter (e.g., Work, Personal): ")
        .await?
    else {
        return Ok(false);
    };
    let out = commands::list_tasks(store, ListArgs::new(optional(category)));
    prompt.say(out.message()).await?;
    Ok(true)
}
