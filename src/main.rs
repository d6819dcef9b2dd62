use clap::Parser;
use std::process::ExitCode;
use tally::args::{Args, Command, ExpenseSubcommand, TodoSubcommand};
use tally::menu::{run_expense_menu, run_todo_menu, Prompt};
use tally::{commands, Config, ExpenseStore, Result, SystemClock, TaskStore};
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().tally_home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args.clone()).await?.print(),

        Command::Todo(todo_args) => {
            let config = Config::load(home).await?;
            let mut store = TaskStore::load(config.todo_path(), SystemClock).await?;
            match todo_args.action() {
                TodoSubcommand::Add(args) => {
                    commands::add_task(&mut store, args.clone()).await?.print()
                }
                TodoSubcommand::Delete(args) => {
                    commands::delete_task(&mut store, args.clone()).await?.print()
                }
                TodoSubcommand::Update(args) => {
                    commands::update_task(&mut store, args.clone()).await?.print()
                }
                TodoSubcommand::List(args) => commands::list_tasks(&store, args.clone()).print(),
                TodoSubcommand::Menu => run_todo_menu(&mut store, &mut Prompt::stdio())
                    .await?
                    .print(),
            }
        }

        Command::Expense(expense_args) => {
            let config = Config::load(home).await?;
            let currency = config.currency();
            let mut store = ExpenseStore::load(config.expense_path(), SystemClock).await?;
            match expense_args.action() {
                ExpenseSubcommand::Add(args) => {
                    commands::add_expense(&mut store, currency, args.clone())
                        .await?
                        .print()
                }
                ExpenseSubcommand::Delete(args) => {
                    commands::delete_expense(&mut store, currency, args.clone())
                        .await?
                        .print()
                }
                ExpenseSubcommand::Update(args) => {
                    commands::update_expense(&mut store, args.clone())
                        .await?
                        .print()
                }
                ExpenseSubcommand::List(args) => {
                    commands::list_expenses(&store, currency, args.clone()).print()
                }
                ExpenseSubcommand::Summarize(args) => {
                    commands::summarize_expenses(&store, currency, args.clone()).print()
                }
                ExpenseSubcommand::Menu => {
                    run_expense_menu(&mut store, currency, &mut Prompt::stdio())
                        .await?
                        .print()
                }
            }
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
