//! Where "now" comes from.
//!
//! Records are stamped with the time they were created and expenses default to today's date.
//! The store asks a `Clock` for these values instead of reading the system time directly, so
//! tests can pin them.

use chrono::{Local, NaiveDateTime};
use std::fmt::Debug;

/// `created_at` format, e.g. `2024-03-09 14:05:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `date` and `due_date` format, e.g. `2024-03-09`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub trait Clock: Debug + Send + Sync {
    /// The current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// The current time formatted with `TIMESTAMP_FORMAT`.
    fn timestamp(&self) -> String {
        self.now().format(TIMESTAMP_FORMAT).to_string()
    }

    /// The current date formatted with `DATE_FORMAT`.
    fn today(&self) -> String {
        self.now().format(DATE_FORMAT).to_string()
    }
}

/// Reads the local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self(now)
    }

    /// Parses `s` with `TIMESTAMP_FORMAT`.
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        Ok(Self(NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)?))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_formats() {
        let clock = FixedClock::parse("2024-03-09 14:05:00").unwrap();
        assert_eq!(clock.timestamp(), "2024-03-09 14:05:00");
        assert_eq!(clock.today(), "2024-03-09");
    }

    #[test]
    fn test_fixed_clock_bad_input() {
        assert!(FixedClock::parse("2024-03-09").is_err());
    }

    #[test]
    fn test_system_clock_today_shape() {
        let today = SystemClock.today();
        assert_eq!(today.len(), 10);
        assert_eq!(&today[4..5], "-");
    }
}
