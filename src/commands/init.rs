use crate::args::InitArgs;
use crate::commands::Out;
use crate::config::Settings;
use crate::{Config, Result};
use std::path::Path;

/// Creates the tally home directory and writes its `config.json`.
///
/// # Arguments
/// - `tally_home` - The directory that will hold the config, e.g. `$HOME/tally`
/// - `args` - Optional currency prefix and data file locations.
///
/// # Errors
/// - Returns a `Config` error if the config already exists or any file operation fails.
pub async fn init(tally_home: &Path, args: InitArgs) -> Result<Out<()>> {
    let settings = Settings {
        currency: args.currency().map(str::to_string),
        todo_file: args.todo_file().map(Path::to_path_buf),
        expense_file: args.expense_file().map(Path::to_path_buf),
    };
    let config = Config::create(tally_home, settings).await?;
    Ok(format!("Initialized tally home at {}", config.root().display()).into())
}
