//! Durable storage for the transaction ledger.
//!
//! The whole ledger lives under a single file (the storage slot) as a JSON
//! array of transactions, written in full on every mutation.

use std::{fs, io::ErrorKind, path::PathBuf};

use crate::{Error, transaction::Transaction};

/// The single durable slot that holds the serialized ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageSlot {
    path: PathBuf,
}

impl StorageSlot {
    /// Create a storage slot backed by the file at `path`.
    ///
    /// The file is not touched until the first [save](StorageSlot::save).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Serialize the full ledger and write it to the slot.
    ///
    /// # Errors
    /// Returns [Error::StorageWrite] if the file cannot be written, e.g. the
    /// disk is full or the directory is missing. The caller's in-memory state
    /// is unaffected.
    pub fn save(&self, transactions: &[Transaction]) -> Result<(), Error> {
        let encoded = serde_json::to_string_pretty(transactions)
            .map_err(|error| Error::StorageWrite(error.to_string()))?;

        fs::write(&self.path, encoded).map_err(|error| {
            Error::StorageWrite(format!("{}: {error}", self.path.display()))
        })
    }

    /// Read the ledger from the slot.
    ///
    /// A missing file means the ledger has never been saved and yields an
    /// empty collection. Unreadable or malformed data is treated the same
    /// way: the error is logged and an empty collection is returned, so a
    /// corrupt slot can never prevent the application from starting.
    pub fn load(&self) -> Vec<Transaction> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(error) => {
                tracing::warn!(
                    "could not read ledger file {}, starting empty: {error}",
                    self.path.display()
                );
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(transactions) => transactions,
            Err(error) => {
                tracing::warn!(
                    "ledger file {} is malformed, starting empty: {error}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod storage_slot_tests {
    use std::fs;

    use tempfile::tempdir;
    use time::macros::date;

    use crate::transaction::{Transaction, TransactionKind};

    use super::StorageSlot;

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            Transaction {
                id: "1700000000000".to_owned(),
                kind: TransactionKind::Income,
                amount: 1000.0,
                description: Some("Salary".to_owned()),
                date: date!(2024 - 03 - 01),
            },
            Transaction {
                id: "1700000000001".to_owned(),
                kind: TransactionKind::Expense,
                amount: 300.0,
                description: None,
                date: date!(2024 - 03 - 15),
            },
        ]
    }

    #[test]
    fn save_then_load_round_trips() {
        let data_dir = tempdir().unwrap();
        let slot = StorageSlot::new(data_dir.path().join("ledger.json"));
        let want = sample_transactions();

        slot.save(&want).expect("Could not save ledger");
        let got = slot.load();

        assert_eq!(want, got);
    }

    #[test]
    fn load_missing_file_yields_empty_ledger() {
        let data_dir = tempdir().unwrap();
        let slot = StorageSlot::new(data_dir.path().join("does_not_exist.json"));

        assert_eq!(slot.load(), Vec::new());
    }

    #[test]
    fn load_malformed_file_yields_empty_ledger() {
        let data_dir = tempdir().unwrap();
        let path = data_dir.path().join("ledger.json");
        fs::write(&path, "{ not json ]").unwrap();
        let slot = StorageSlot::new(path);

        assert_eq!(slot.load(), Vec::new());
    }

    #[test]
    fn save_to_missing_directory_reports_write_error() {
        let data_dir = tempdir().unwrap();
        let slot = StorageSlot::new(data_dir.path().join("missing").join("ledger.json"));

        let result = slot.save(&sample_transactions());

        assert!(matches!(result, Err(crate::Error::StorageWrite(_))));
    }
}
