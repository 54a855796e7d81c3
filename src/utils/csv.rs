use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

use crate::models::expense::Expense;

#[derive(Debug, Deserialize)]
struct RawExpense {
    title: String,
    amount: String,
}

pub fn export_expenses<P: AsRef<Path>>(path: P, expenses: &[Expense]) -> Result<()> {
    let mut writer = csv::Writer::from_path(&path).context("Failed to create CSV file")?;
    writer.write_record(["title", "amount"])?;

    for expense in expenses {
        let amount = expense.amount.to_string();
        writer.write_record([expense.title.as_str(), amount.as_str()])?;
    }

    writer.flush()?;
    Ok(())
}

/// Read expenses from a CSV file with a `title,amount` header. Rows that
/// fail to parse or validate are skipped, not fatal.
pub fn import_expenses<P: AsRef<Path>>(path: P) -> Result<Vec<Expense>> {
    let file = File::open(&path).context("Failed to open CSV file")?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let mut expenses = Vec::new();
    for (index, result) in reader.deserialize::<RawExpense>().enumerate() {
        match result {
            Ok(raw) => match Expense::from_input(&raw.title, &raw.amount) {
                Ok(expense) => expenses.push(expense),
                Err(e) => {
                    tracing::warn!("Skipping line {}: {}", index + 2, e);
                }
            },
            Err(e) => {
                tracing::warn!("Skipping line {}: {}", index + 2, e);
            }
        }
    }

    Ok(expenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn export_then_import_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.csv");

        let expenses = vec![
            Expense::from_input("Bus", "20").unwrap(),
            Expense::from_input("Lunch, with drinks", "15.5").unwrap(),
        ];

        export_expenses(&path, &expenses).unwrap();
        let imported = import_expenses(&path).unwrap();

        assert_eq!(imported, expenses);
    }

    #[test]
    fn import_skips_malformed_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.csv");
        std::fs::write(
            &path,
            "title,amount\nBus,20\n,5\nCoffee,abc\nLunch,15.5\n",
        )
        .unwrap();

        let imported = import_expenses(&path).unwrap();
        assert_eq!(imported.len(), 2);
        assert_eq!(imported[0].title, "Bus");
        assert_eq!(imported[1].title, "Lunch");
        assert_eq!(imported[1].amount, dec!(15.5));
    }
}
