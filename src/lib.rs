pub mod args;
mod clock;
pub mod commands;
mod config;
mod error;
pub mod menu;
pub mod model;
mod store;
#[cfg(test)]
mod test;
mod utils;

pub use clock::{Clock, FixedClock, SystemClock, DATE_FORMAT, TIMESTAMP_FORMAT};
pub use config::{Config, Settings, DEFAULT_CURRENCY};
pub use error::{Error, ErrorType, IntoResult, Result};
pub use store::{Entry, ExpenseStore, GroupOrder, Listing, Store, TaskStore, Total};
