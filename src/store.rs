use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use rust_decimal::Decimal;

use crate::models::expense::Expense;

/// File name of the snapshot under the data directory.
pub const SNAPSHOT_FILE: &str = "expenses.json";

/// Owns the ordered expense list and its on-disk snapshot. Every mutation
/// rewrites the whole snapshot before the caller gets control back, so the
/// file always mirrors the in-memory list.
#[derive(Debug)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    path: PathBuf,
}

impl ExpenseStore {
    /// Load the snapshot at `path`. A missing file, unreadable content, or
    /// anything that is not a JSON array of records yields an empty list.
    /// Intentionally non-failing; nothing is salvaged from a bad snapshot.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let expenses = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<Expense>>(&content) {
                Ok(expenses) => expenses,
                Err(e) => {
                    tracing::warn!("Ignoring unreadable snapshot {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        ExpenseStore { expenses, path }
    }

    /// Default snapshot location under the user data directory.
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?
            .join("expense-tracker");

        if let Err(e) = fs::create_dir_all(&data_dir) {
            tracing::warn!("Could not create data directory: {}", e);
        }

        Ok(data_dir.join(SNAPSHOT_FILE))
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn get(&self, index: usize) -> Option<&Expense> {
        self.expenses.get(index)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Append a record to the end of the list.
    pub fn add(&mut self, expense: Expense) {
        self.expenses.push(expense);
        self.persist();
    }

    /// Overwrite the record at `index` in place, preserving its position.
    /// Out-of-range is a no-op.
    pub fn update(&mut self, index: usize, expense: Expense) -> bool {
        match self.expenses.get_mut(index) {
            Some(slot) => {
                *slot = expense;
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Remove the record at `index`, shifting later records down by one.
    /// Out-of-range is a no-op.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.expenses.len() {
            return false;
        }
        self.expenses.remove(index);
        self.persist();
        true
    }

    /// Sum of all amounts, recomputed from the live list on every call.
    pub fn total(&self) -> Decimal {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Rewrite the whole snapshot as a JSON array. Write failures are
    /// logged and otherwise ignored; the in-memory list stays authoritative.
    pub fn persist(&self) {
        let content = match serde_json::to_string(&self.expenses) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to serialize expenses: {}", e);
                return;
            }
        };

        if let Err(e) = fs::write(&self.path, content) {
            tracing::warn!("Failed to write snapshot {}: {}", self.path.display(), e);
        }
    }
}
