//! Implements the struct that holds the shared state of the server.

use std::sync::{Arc, Mutex};

use crate::transaction::TransactionStore;

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The transaction ledger, shared between request handlers.
    pub ledger: Arc<Mutex<TransactionStore>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] from a loaded ledger.
    pub fn new(ledger: TransactionStore, local_timezone: &str) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
            local_timezone: local_timezone.to_owned(),
        }
    }
}
