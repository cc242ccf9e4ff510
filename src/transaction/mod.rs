//! Transaction management for the ledger application.
//!
//! This module contains everything related to transactions:
//! - The [Transaction] model and [TransactionStore] that owns the ledger
//! - Month filtering and income/expense/balance aggregation
//! - Route handlers for the ledger page and the transaction endpoints

mod create_endpoint;
mod delete_endpoint;
mod filter;
mod ledger_page;
mod model;
mod store;
mod view;

pub use create_endpoint::{CreateTransactionState, TransactionForm, create_transaction_endpoint};
pub use delete_endpoint::{DeleteTransactionState, delete_transaction_endpoint};
pub use filter::{MonthFilter, Summary, filter_by_month, sort_by_date_descending, summarize};
pub use ledger_page::{LedgerPageState, LedgerQuery, get_ledger_page};
pub use model::{Transaction, TransactionDraft, TransactionId, TransactionKind};
pub use store::TransactionStore;
