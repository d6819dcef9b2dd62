//! These structs provide the CLI interface for the tally CLI.

use crate::model::{Amount, ExpenseUpdates, NewExpense, NewTask, TaskUpdates};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// tally: a to-do list and an expense tracker that live in plain JSON files.
///
/// Every change is written straight back to the data file. Records are addressed by the number
/// shown next to them in `list`, which shifts when an earlier record is deleted.
///
/// Run `tally init` once to create the tally home directory and its config file. Then use the
/// `todo` and `expense` subcommands, or `todo menu` / `expense menu` for the interactive menus.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the tally home directory and its config file.
    ///
    /// By default the home is $HOME/tally and the data files are tasks.json and expenses.json
    /// inside it. Pass --todo-file or --expense-file to keep the data somewhere else, e.g. to
    /// reuse files written by an older tool.
    Init(InitArgs),
    /// Add, change, remove and view to-do tasks.
    Todo(TodoArgs),
    /// Add, change, remove, view and summarize expenses.
    Expense(ExpenseArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where tally data and configuration is held. Defaults to ~/tally
    #[arg(long, env = "TALLY_HOME", default_value_t = default_tally_home())]
    tally_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, tally_home: PathBuf) -> Self {
        Self {
            log_level,
            tally_home: tally_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn tally_home(&self) -> &DisplayPath {
        &self.tally_home
    }
}

/// Args for the `tally init` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct InitArgs {
    /// Printed in front of amounts, e.g. Ksh or $.
    #[arg(long)]
    currency: Option<String>,

    /// Where to keep the to-do list, relative to the tally home or absolute.
    #[arg(long)]
    todo_file: Option<PathBuf>,

    /// Where to keep the expenses, relative to the tally home or absolute.
    #[arg(long)]
    expense_file: Option<PathBuf>,
}

impl InitArgs {
    pub fn new(
        currency: Option<String>,
        todo_file: Option<PathBuf>,
        expense_file: Option<PathBuf>,
    ) -> Self {
        Self {
            currency,
            todo_file,
            expense_file,
        }
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    pub fn todo_file(&self) -> Option<&Path> {
        self.todo_file.as_deref()
    }

    pub fn expense_file(&self) -> Option<&Path> {
        self.expense_file.as_deref()
    }
}

/// Args for the `tally todo` command.
#[derive(Debug, Parser, Clone)]
pub struct TodoArgs {
    #[command(subcommand)]
    action: TodoSubcommand,
}

impl TodoArgs {
    pub fn new(action: TodoSubcommand) -> Self {
        Self { action }
    }

    pub fn action(&self) -> &TodoSubcommand {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum TodoSubcommand {
    /// Add a task to the end of the list.
    Add(AddTaskArgs),
    /// Remove the task at a position.
    Delete(DeleteArgs),
    /// Change some fields of the task at a position.
    Update(UpdateTaskArgs),
    /// Show all tasks, or those in one category.
    List(ListArgs),
    /// Run the interactive numbered menu.
    Menu,
}

/// Args for the `tally expense` command.
#[derive(Debug, Parser, Clone)]
pub struct ExpenseArgs {
    #[command(subcommand)]
    action: ExpenseSubcommand,
}

impl ExpenseArgs {
    pub fn new(action: ExpenseSubcommand) -> Self {
        Self { action }
    }

    pub fn action(&self) -> &ExpenseSubcommand {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ExpenseSubcommand {
    /// Record an expense.
    Add(AddExpenseArgs),
    /// Remove the expense at a position.
    Delete(DeleteArgs),
    /// Change some fields of the expense at a position.
    Update(UpdateExpenseArgs),
    /// Show all expenses, or those in one category.
    List(ListArgs),
    /// Show totals per category or per month.
    Summarize(SummarizeArgs),
    /// Run the interactive numbered menu.
    Menu,
}

/// Args for `tally todo add`.
#[derive(Debug, Parser, Clone)]
pub struct AddTaskArgs {
    /// What needs doing.
    description: String,

    /// e.g. Work, Personal, School. Defaults to General.
    #[arg(long)]
    category: Option<String>,

    /// YYYY-MM-DD
    #[arg(long)]
    due_date: Option<String>,
}

impl AddTaskArgs {
    pub fn new(
        description: impl Into<String>,
        category: Option<String>,
        due_date: Option<String>,
    ) -> Self {
        Self {
            description: description.into(),
            category,
            due_date,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl From<AddTaskArgs> for NewTask {
    fn from(args: AddTaskArgs) -> Self {
        NewTask {
            description: args.description,
            category: args.category,
            due_date: args.due_date,
        }
    }
}

/// Args for deleting a record by position.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The number shown next to the record in `list`.
    position: usize,
}

impl DeleteArgs {
    pub fn new(position: usize) -> Self {
        Self { position }
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

/// Whether a task is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Done,
    Open,
}

serde_plain::derive_display_from_serialize!(TaskStatus);
serde_plain::derive_fromstr_from_deserialize!(TaskStatus);

impl From<TaskStatus> for bool {
    fn from(status: TaskStatus) -> Self {
        status == TaskStatus::Done
    }
}

/// Args for `tally todo update`. Fields that are not given are left unchanged.
#[derive(Debug, Parser, Clone)]
pub struct UpdateTaskArgs {
    /// The number shown next to the task in `list`.
    position: usize,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    category: Option<String>,

    /// YYYY-MM-DD
    #[arg(long)]
    due_date: Option<String>,

    /// Mark the task done or open.
    #[arg(long)]
    status: Option<TaskStatus>,
}

impl UpdateTaskArgs {
    pub fn new(position: usize, updates: TaskUpdates) -> Self {
        Self {
            position,
            description: updates.description,
            category: updates.category,
            due_date: updates.due_date,
            status: updates.completed.map(|done| {
                if done {
                    TaskStatus::Done
                } else {
                    TaskStatus::Open
                }
            }),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn updates(&self) -> TaskUpdates {
        TaskUpdates {
            description: self.description.clone(),
            category: self.category.clone(),
            due_date: self.due_date.clone(),
            completed: self.status.map(bool::from),
        }
    }
}

/// Args for listing records.
#[derive(Debug, Parser, Clone, Default)]
pub struct ListArgs {
    /// Only show records in this category (case-insensitive).
    #[arg(long)]
    category: Option<String>,
}

impl ListArgs {
    pub fn new(category: Option<String>) -> Self {
        Self { category }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// Args for `tally expense add`.
#[derive(Debug, Parser, Clone)]
pub struct AddExpenseArgs {
    /// How much was spent. Must not be negative.
    #[arg(allow_negative_numbers = true)]
    amount: Amount,

    /// e.g. Food, Transport, Bills. Defaults to General.
    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// YYYY-MM-DD, defaults to today.
    #[arg(long)]
    date: Option<String>,
}

impl AddExpenseArgs {
    pub fn new(
        amount: Amount,
        category: Option<String>,
        description: Option<String>,
        date: Option<String>,
    ) -> Self {
        Self {
            amount,
            category,
            description,
            date,
        }
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

impl From<AddExpenseArgs> for NewExpense {
    fn from(args: AddExpenseArgs) -> Self {
        NewExpense {
            amount: args.amount,
            category: args.category,
            description: args.description,
            date: args.date,
        }
    }
}

/// Args for `tally expense update`. Fields that are not given are left unchanged.
#[derive(Debug, Parser, Clone)]
pub struct UpdateExpenseArgs {
    /// The number shown next to the expense in `list`.
    position: usize,

    #[arg(long, allow_negative_numbers = true)]
    amount: Option<Amount>,

    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,
}

impl UpdateExpenseArgs {
    pub fn new(position: usize, updates: ExpenseUpdates) -> Self {
        Self {
            position,
            amount: updates.amount,
            category: updates.category,
            description: updates.description,
            date: updates.date,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn updates(&self) -> ExpenseUpdates {
        ExpenseUpdates {
            amount: self.amount,
            category: self.category.clone(),
            description: self.description.clone(),
            date: self.date.clone(),
        }
    }
}

/// How to group expenses in a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SummaryKey {
    /// One total per category, in the order categories first appear.
    Category,
    /// One total per YYYY-MM, oldest first.
    Month,
}

serde_plain::derive_display_from_serialize!(SummaryKey);
serde_plain::derive_fromstr_from_deserialize!(SummaryKey);

/// Args for `tally expense summarize`.
#[derive(Debug, Parser, Clone)]
pub struct SummarizeArgs {
    by: SummaryKey,
}

impl SummarizeArgs {
    pub fn new(by: SummaryKey) -> Self {
        Self { by }
    }

    pub fn by(&self) -> SummaryKey {
        self.by
    }
}

fn default_tally_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("tally"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --tally-home or TALLY_HOME instead of relying on the default \
                tally home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("tally")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        <Args as CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_parse_todo_update() {
        let args = Args::try_parse_from([
            "tally",
            "--tally-home",
            "/tmp/t",
            "todo",
            "update",
            "2",
            "--category",
            "Work",
            "--status",
            "done",
        ])
        .unwrap();
        assert_eq!(args.common().tally_home().path(), Path::new("/tmp/t"));
        let Command::Todo(todo) = args.command() else {
            panic!("expected todo");
        };
        let TodoSubcommand::Update(update) = todo.action() else {
            panic!("expected update");
        };
        assert_eq!(update.position(), 2);
        assert_eq!(
            update.updates(),
            TaskUpdates {
                category: Some("Work".into()),
                completed: Some(true),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_parse_expense_add_negative_amount() {
        let args = Args::try_parse_from(["tally", "expense", "add", "-5", "--category", "Food"])
            .unwrap();
        let Command::Expense(expense) = args.command() else {
            panic!("expected expense");
        };
        let ExpenseSubcommand::Add(add) = expense.action() else {
            panic!("expected add");
        };
        assert!(add.amount().is_negative());
    }

    #[test]
    fn test_parse_summarize() {
        let args = Args::try_parse_from(["tally", "expense", "summarize", "month"]).unwrap();
        let Command::Expense(expense) = args.command() else {
            panic!("expected expense");
        };
        let ExpenseSubcommand::Summarize(s) = expense.action() else {
            panic!("expected summarize");
        };
        assert_eq!(s.by(), SummaryKey::Month);
    }

    #[test]
    fn test_parse_bad_amount() {
        assert!(Args::try_parse_from(["tally", "expense", "add", "lots"]).is_err());
    }

    #[test]
    fn test_task_status_text() {
        assert_eq!(TaskStatus::Done.to_string(), "done");
        assert!(bool::from(TaskStatus::Done));
        assert!(!bool::from(TaskStatus::Open));
    }
}
