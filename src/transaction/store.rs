//! The in-memory transaction ledger and its mutation primitives.

use time::OffsetDateTime;

use crate::{Error, storage::StorageSlot};

use super::model::{Transaction, TransactionDraft};

/// The authoritative collection of transactions.
///
/// The store owns the only copy of the ledger; views work with borrowed or
/// cloned projections. Every mutation persists the full collection to the
/// backing [StorageSlot] before returning.
#[derive(Debug)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    slot: StorageSlot,
}

impl TransactionStore {
    /// Load the persisted ledger from `slot`.
    ///
    /// Missing or corrupt data is treated as an empty ledger, so this never
    /// fails (see [StorageSlot::load]).
    pub fn load(slot: StorageSlot) -> Self {
        let transactions = slot.load();

        if !transactions.is_empty() {
            tracing::info!("loaded {} transactions from the ledger file", transactions.len());
        }

        Self { transactions, slot }
    }

    /// Validate `draft`, assign it a fresh unique ID, append it to the ledger
    /// and persist.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if the amount is not a positive, finite
    ///   number. The ledger is unchanged.
    /// - [Error::StorageWrite] if the ledger file could not be written. The
    ///   transaction was still added for the current session.
    pub fn add(&mut self, draft: TransactionDraft) -> Result<Transaction, Error> {
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(Error::InvalidAmount(draft.amount.to_string()));
        }

        let transaction = Transaction {
            id: self.next_id(),
            kind: draft.kind,
            amount: draft.amount,
            description: draft.description,
            date: draft.date,
        };

        self.transactions.push(transaction.clone());
        self.slot.save(&self.transactions)?;

        Ok(transaction)
    }

    /// Remove the transaction with the given `id` and persist.
    ///
    /// Removing an unknown ID is a no-op, not an error: the outcome the
    /// caller asked for (no such transaction in the ledger) already holds.
    /// Returns whether a transaction was actually removed.
    ///
    /// # Errors
    /// This function will return an [Error::StorageWrite] if the ledger file
    /// could not be written. The transaction was still removed for the
    /// current session.
    pub fn remove(&mut self, id: &str) -> Result<bool, Error> {
        let count_before = self.transactions.len();
        self.transactions.retain(|transaction| transaction.id != id);

        if self.transactions.len() == count_before {
            return Ok(false);
        }

        self.slot.save(&self.transactions)?;

        Ok(true)
    }

    /// All transactions in insertion order.
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Generate a unique transaction ID from the current timestamp.
    ///
    /// Nanosecond precision makes collisions unlikely to begin with; bumping
    /// until the ID is unused makes them impossible within one ledger.
    fn next_id(&self) -> String {
        let mut candidate = OffsetDateTime::now_utc().unix_timestamp_nanos();

        loop {
            let id = candidate.to_string();
            if !self.transactions.iter().any(|transaction| transaction.id == id) {
                return id;
            }
            candidate += 1;
        }
    }
}
