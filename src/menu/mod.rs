//! The interactive numbered menus.
//!
//! A menu reads one line per prompt, calls the same command handlers as the subcommands and
//! writes their messages back. Mistakes such as a non-numeric position are reported and the menu
//! is shown again. Closing the input ends the menu as if Exit had been chosen.

mod expense;
mod todo;

use crate::error::{Error, ErrorType, IntoResult};
use crate::model::Amount;
use crate::Result;
use anyhow::Context;
use std::str::FromStr;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout,
};
use tracing::debug;

pub use expense::run_expense_menu;
pub use todo::run_todo_menu;

/// A line-oriented conversation with the user.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl Prompt<BufReader<Stdin>, Stdout> {
    /// A prompt over the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> Prompt<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Writes `question` without a newline and reads the answer, trimmed. Returns `None` once the
    /// input is closed.
    pub async fn ask(&mut self, question: &str) -> Result<Option<String>> {
        self.write(question).await?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .await
            .context("Unable to read input")
            .pub_result(ErrorType::Io)?;
        if read == 0 {
            debug!("Input closed");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Writes `text` followed by a newline.
    pub async fn say(&mut self, text: &str) -> Result<()> {
        self.write(&format!("{text}\n")).await
    }

    /// Reports the outcome of a command: its message on success, the error otherwise.
    pub(crate) async fn report<T>(&mut self, outcome: Result<T>) -> Result<()>
    where
        T: Into<String>,
    {
        match outcome {
            Ok(message) => self.say(&message.into()).await,
            Err(e) => {
                debug!("Menu action failed: {e:?}");
                self.say(&e.to_string()).await
            }
        }
    }

    async fn write(&mut self, text: &str) -> Result<()> {
        self.output
            .write_all(text.as_bytes())
            .await
            .context("Unable to write output")
            .pub_result(ErrorType::Io)?;
        self.output
            .flush()
            .await
            .context("Unable to flush output")
            .pub_result(ErrorType::Io)
    }
}

pub(crate) fn parse_position(s: &str) -> Result<usize> {
    s.parse::<usize>()
        .map_err(|_| Error::msg(ErrorType::InvalidInput, "Please enter a valid number."))
}

pub(crate) fn parse_amount(s: &str) -> Result<Amount> {
    Amount::from_str(s).map_err(|_| {
        Error::msg(
            ErrorType::InvalidInput,
            "Please enter a valid number for amount.",
        )
    })
}

/// `yes` and `no` in any case; anything else means "leave unchanged".
pub(crate) fn parse_yes_no(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

/// An empty answer means "nothing given".
pub(crate) fn optional(answer: String) -> Option<String> {
    if answer.is_empty() {
        None
    } else {
        Some(answer)
    }
}
