//! A list of records held in memory and mirrored to a single JSON file.
//!
//! The file is read once, when the store is loaded. After that every mutation rewrites the whole
//! file (write to a temporary sibling, then rename) and every query is answered from memory.
//! Records are addressed by their 1-based position in the list.

use crate::error::{Error, ErrorType, IntoResult};
use crate::model::{category_matches, Amount, Expense, Record, Task};
use crate::{utils, Clock, Result};
use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

pub type TaskStore = Store<Task>;
pub type ExpenseStore = Store<Expense>;

#[derive(Debug)]
pub struct Store<R> {
    path: PathBuf,
    records: Vec<R>,
    clock: Box<dyn Clock>,
}

/// A record together with its position in the unfiltered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry<T> {
    pub position: usize,
    pub record: T,
}

/// The result of `Store::list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing<'a, R> {
    /// The store holds no records at all.
    Empty,
    /// The store has records but none in the requested category.
    NoMatch(String),
    Entries(Vec<Entry<&'a R>>),
}

/// How `Store::summarize_by` orders its groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOrder {
    /// In the order each key is first seen while walking the records.
    FirstSeen,
    /// Sorted by key.
    Ascending,
}

/// One group of a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Total {
    pub key: String,
    pub total: Amount,
}

impl<R: Record> Store<R> {
    /// Loads the records at `path`. A missing file is an empty store.
    ///
    /// # Errors
    /// - `MalformedData` if the file exists but cannot be read or is not a JSON array of records.
    pub async fn load(path: impl Into<PathBuf>, clock: impl Clock + 'static) -> Result<Self> {
        let path = path.into();
        let records = match utils::read_if_exists(&path)
            .await
            .pub_result(ErrorType::MalformedData)?
        {
            None => {
                debug!("No data file at {}, starting empty", path.display());
                Vec::new()
            }
            Some(content) => serde_json::from_str::<Vec<R>>(&content)
                .with_context(|| {
                    format!(
                        "The data file at {} is not a valid list of records",
                        path.display()
                    )
                })
                .pub_result(ErrorType::MalformedData)?,
        };
        debug!("Loaded {} records from {}", records.len(), path.display());
        Ok(Self {
            path,
            records,
            clock: Box::new(clock),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record at 1-based `position`, if any.
    pub fn get(&self, position: usize) -> Option<&R> {
        position
            .checked_sub(1)
            .and_then(|ix| self.records.get(ix))
    }

    /// Creates a record from `new`, appends it and saves.
    pub async fn add(&mut self, new: R::New) -> Result<&R> {
        let record = R::create(new, self.clock.as_ref());
        self.records.push(record);
        if let Err(e) = self.save().await {
            self.records.pop();
            return Err(e);
        }
        let ix = self.records.len() - 1;
        Ok(&self.records[ix])
    }

    /// Removes the record at 1-based `position`, saves, and returns the removed record.
    ///
    /// # Errors
    /// - `OutOfRange` if there is no record at `position`. Nothing is changed.
    pub async fn delete(&mut self, position: usize) -> Result<R> {
        let ix = self.index(position)?;
        let removed = self.records.remove(ix);
        if let Err(e) = self.save().await {
            self.records.insert(ix, removed);
            return Err(e);
        }
        Ok(removed)
    }

    /// Applies `updates` to the record at 1-based `position` and saves.
    ///
    /// # Errors
    /// - `OutOfRange` if there is no record at `position`. Nothing is changed.
    pub async fn update(&mut self, position: usize, updates: R::Updates) -> Result<&R> {
        let ix = self.index(position)?;
        let previous = self.records[ix].clone();
        self.records[ix].apply(updates);
        if let Err(e) = self.save().await {
            self.records[ix] = previous;
            return Err(e);
        }
        Ok(&self.records[ix])
    }

    /// All records, or those whose category matches `category` ignoring case.
    ///
    /// Positions always refer to the unfiltered list so they can be passed to `delete` and
    /// `update`.
    pub fn list(&self, category: Option<&str>) -> Listing<'_, R> {
        if self.records.is_empty() {
            return Listing::Empty;
        }
        let entries: Vec<Entry<&R>> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| category.map_or(true, |c| category_matches(r.category(), c)))
            .map(|(ix, record)| Entry {
                position: ix + 1,
                record,
            })
            .collect();
        match (entries.is_empty(), category) {
            (true, Some(c)) => Listing::NoMatch(c.to_string()),
            _ => Listing::Entries(entries),
        }
    }

    /// Groups every record by `key` and sums `value` within each group.
    pub fn summarize_by<K, V>(&self, key: K, value: V, order: GroupOrder) -> Vec<Total>
    where
        K: Fn(&R) -> String,
        V: Fn(&R) -> Decimal,
    {
        let mut totals: Vec<(String, Decimal)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for record in &self.records {
            let k = key(record);
            let v = value(record);
            match index.get(&k) {
                Some(&ix) => totals[ix].1 += v,
                None => {
                    index.insert(k.clone(), totals.len());
                    totals.push((k, v));
                }
            }
        }
        if order == GroupOrder::Ascending {
            totals.sort_by(|a, b| a.0.cmp(&b.0));
        }
        totals
            .into_iter()
            .map(|(key, total)| Total {
                key,
                total: Amount::new(total),
            })
            .collect()
    }

    fn index(&self, position: usize) -> Result<usize> {
        if position == 0 || position > self.records.len() {
            let message = match self.records.len() {
                0 => format!("There is nothing at position {position}, the list is empty"),
                len => format!("There is nothing at position {position}, valid positions are 1 to {len}"),
            };
            return Err(Error::msg(ErrorType::OutOfRange, message));
        }
        Ok(position - 1)
    }

    async fn save(&self) -> Result<()> {
        let json = utils::to_json_pretty(&self.records).pub_result(ErrorType::Io)?;
        utils::write_atomic(&self.path, json)
            .await
            .pub_result(ErrorType::Io)?;
        debug!("Saved {} records to {}", self.records.len(), self.path.display());
        Ok(())
    }
}

impl ExpenseStore {
    /// Totals per category, in first-seen order.
    pub fn totals_by_category(&self) -> Vec<Total> {
        self.summarize_by(
            |e| e.category.clone(),
            |e| e.amount.value(),
            GroupOrder::FirstSeen,
        )
    }

    /// Totals per `YYYY-MM`, oldest first.
    pub fn totals_by_month(&self) -> Vec<Total> {
        self.summarize_by(|e| e.month(), |e| e.amount.value(), GroupOrder::Ascending)
    }
}
