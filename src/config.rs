//! Configuration file handling for tally.
//!
//! The configuration file is stored at `$TALLY_HOME/config.json` and holds the currency prefix
//! used when printing amounts and, optionally, where the to-do and expense data files live.

use crate::error::{ErrorType, IntoResult};
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "tally";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const TASKS_JSON: &str = "tasks.json";
const EXPENSES_JSON: &str = "expenses.json";
pub const DEFAULT_CURRENCY: &str = "Ksh";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$TALLY_HOME` and from there it loads `$TALLY_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the tally home directory, if needed, and writes an initial `config.json`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the tally home, e.g. `$HOME/tally`
    /// - `settings` - The values to write; `None` fields keep their defaults.
    ///
    /// # Errors
    /// - Returns an error if a `config.json` already exists or if any file operation fails.
    pub async fn create(dir: impl Into<PathBuf>, settings: Settings) -> Result<Self> {
        Self::create_inner(dir.into(), settings)
            .await
            .pub_result(ErrorType::Config)
    }

    async fn create_inner(maybe_relative: PathBuf, settings: Settings) -> anyhow::Result<Self> {
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the tally home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            )
        }

        let config_file = ConfigFile {
            currency: settings
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            todo_file: settings.todo_file,
            expense_file: settings.expense_file,
            ..ConfigFile::default()
        };
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that `tally_home` exists and that the config file exists
    /// - load and validate the config file
    /// - return the loaded configuration object
    pub async fn load(tally_home: impl Into<PathBuf>) -> Result<Self> {
        Self::load_inner(tally_home.into())
            .await
            .pub_result(ErrorType::Config)
    }

    async fn load_inner(maybe_relative: PathBuf) -> anyhow::Result<Self> {
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Tally home is missing, run 'tally init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run 'tally init' first",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path).await?;
        debug!("Loaded config from {}", config_path.display());

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn currency(&self) -> &str {
        &self.config_file.currency
    }

    /// The to-do data file. Relative paths are resolved against the tally home.
    pub fn todo_path(&self) -> PathBuf {
        self.root.join(self.config_file.todo_file())
    }

    /// The expense data file. Relative paths are resolved against the tally home.
    pub fn expense_path(&self) -> PathBuf {
        self.root.join(self.config_file.expense_file())
    }
}

/// Values supplied to `tally init`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub currency: Option<String>,
    pub todo_file: Option<PathBuf>,
    pub expense_file: Option<PathBuf>,
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "tally",
///   "config_version": 1,
///   "currency": "Ksh",
///   "todo_file": "tasks.json",
///   "expense_file": "/home/me/finance/expenses.json"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "tally"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Printed in front of amounts
    #[serde(default = "default_currency")]
    currency: String,

    /// Path to the to-do list file (optional, relative to the tally home or absolute)
    /// Defaults to $TALLY_HOME/tasks.json if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    todo_file: Option<PathBuf>,

    /// Path to the expenses file (optional, relative to the tally home or absolute)
    /// Defaults to $TALLY_HOME/expenses.json if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expense_file: Option<PathBuf>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            currency: default_currency(),
            todo_file: None,
            expense_file: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or names another app
    async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version <= CONFIG_VERSION,
            "Config version {} is unsupported. Is a newer version of tally available?",
            config.config_version
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    fn todo_file(&self) -> PathBuf {
        self.todo_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(TASKS_JSON))
    }

    fn expense_file(&self) -> PathBuf {
        self.expense_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(EXPENSES_JSON))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create_and_load() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("tally_home");
        let created = Config::create(&home, Settings::default()).await.unwrap();
        assert!(created.config_path().is_file());
        assert_eq!(created.currency(), "Ksh");

        let loaded = Config::load(&home).await.unwrap();
        assert_eq!(loaded.root(), created.root());
        assert_eq!(loaded.todo_path(), loaded.root().join("tasks.json"));
        assert_eq!(loaded.expense_path(), loaded.root().join("expenses.json"));
    }

    #[tokio::test]
    async fn test_config_create_with_settings() {
        let dir = TempDir::new().unwrap();
        let elsewhere = dir.path().join("money.json");
        let settings = Settings {
            currency: Some("$".into()),
            todo_file: Some(PathBuf::from("lists/todo.json")),
            expense_file: Some(elsewhere.clone()),
        };
        let config = Config::create(dir.path().join("t"), settings).await.unwrap();
        let loaded = Config::load(config.root()).await.unwrap();
        assert_eq!(loaded.currency(), "$");
        assert_eq!(loaded.todo_path(), loaded.root().join("lists/todo.json"));
        assert_eq!(loaded.expense_path(), elsewhere);
    }

    #[tokio::test]
    async fn test_config_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path(), Settings::default()).await.unwrap();
        let err = Config::create(dir.path(), Settings::default())
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Config);
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path().join("nope")).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Config);
        assert!(err.to_string().contains("tally init"));
    }

    #[tokio::test]
    async fn test_config_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("The config file is missing"));
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{ "app_name": "tally", "config_version": 1 }"#;
        utils::write(&config_path, json).await.unwrap();

        let config = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(config.currency, "Ksh");
        assert_eq!(config.todo_file(), PathBuf::from(TASKS_JSON));
        assert_eq!(config.expense_file(), PathBuf::from(EXPENSES_JSON));
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{ "app_name": "wrong_app", "config_version": 1 }"#;
        utils::write(&config_path, json).await.unwrap();

        let result = ConfigFile::load(&config_path).await;
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_config_file_load_newer_version() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{ "app_name": "tally", "config_version": 99 }"#;
        utils::write(&config_path, json).await.unwrap();
        assert!(ConfigFile::load(&config_path).await.is_err());
    }

    #[test]
    fn test_config_file_serialization_omits_none_fields() {
        let json = serde_json::to_string(&ConfigFile::default()).unwrap();
        assert!(!json.contains("todo_file"));
        assert!(!json.contains("expense_file"));
        assert!(json.contains("\"currency\":\"Ksh\""));
    }
}
