//! Defines the core data model for transactions.

use serde::{Deserialize, Serialize};
use time::Date;

/// The unique ID of a [Transaction].
///
/// IDs are decimal strings derived from the creation timestamp, see
/// [crate::transaction::TransactionStore::add].
pub type TransactionId = String;

/// Whether a transaction brought money in or spent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned, e.g. a salary payment.
    Income,
    /// Money spent, e.g. a grocery shop.
    Expense,
}

impl TransactionKind {
    /// The label to display for this kind.
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// New instances should be created through
/// [crate::transaction::TransactionStore::add], which validates the amount and
/// assigns a unique ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether this transaction is income or an expense.
    pub kind: TransactionKind,
    /// The amount of money spent or earned in this transaction.
    ///
    /// Always positive, the direction comes from `kind`.
    pub amount: f64,
    /// A text description of what the transaction was for.
    ///
    /// Omitted from the ledger file when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the transaction happened.
    pub date: Date,
}

/// The user-supplied fields of a transaction, before it is admitted to the
/// ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    /// Whether this transaction is income or an expense.
    pub kind: TransactionKind,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: Option<String>,
    /// When the transaction happened.
    pub date: Date,
}
