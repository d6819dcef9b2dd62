//! To-do list command handlers.

use crate::args::{AddTaskArgs, DeleteArgs, ListArgs, UpdateTaskArgs};
use crate::commands::Out;
use crate::model::{Record, Task};
use crate::store::{Entry, Listing, TaskStore};
use crate::Result;

/// Adds a task to the end of the list. The task starts out not completed and is stamped with the
/// store clock's current time.
pub async fn add_task(store: &mut TaskStore, args: AddTaskArgs) -> Result<Out<Task>> {
    let task = store.add(args.into()).await?.clone();
    let message = format!(
        "Task '{}' added in category '{}'.",
        task.description(),
        task.category()
    );
    Ok(Out::new(message, task))
}

/// Removes the task at the given position. Later tasks move up by one.
///
/// # Errors
/// - `OutOfRange` if there is no task at the position.
pub async fn delete_task(store: &mut TaskStore, args: DeleteArgs) -> Result<Out<Task>> {
    let task = store.delete(args.position()).await?;
    let message = format!("Task '{}' deleted.", task.description());
    Ok(Out::new(message, task))
}

/// Applies the given field changes to the task at the given position.
///
/// # Errors
/// - `OutOfRange` if there is no task at the position.
pub async fn update_task(store: &mut TaskStore, args: UpdateTaskArgs) -> Result<Out<Task>> {
    let position = args.position();
    let task = store.update(position, args.updates()).await?.clone();
    Ok(Out::new(format!("Task {position} updated."), task))
}

/// Lists every task, or the tasks in one category. Numbers are positions in the full list.
pub fn list_tasks(store: &TaskStore, args: ListArgs) -> Out<Vec<Entry<Task>>> {
    match store.list(args.category()) {
        Listing::Empty => Out::new("No tasks found.", Vec::new()),
        Listing::NoMatch(category) => Out::new(
            format!("No tasks found in category '{category}'."),
            Vec::new(),
        ),
        Listing::Entries(entries) => {
            let lines: Vec<String> = entries.iter().map(format_entry).collect();
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

fn format_entry(entry: &Entry<&Task>) -> String {
    let task = entry.record;
    let status = if task.completed() { "✔" } else { " " };
    format!(
        "{}. [{status}] {} (Category: {}, Due: {}, Created: {})",
        entry.position,
        task.description(),
        task.category(),
        task.due_date().unwrap_or("No due date"),
        task.created_at()
    )
}
