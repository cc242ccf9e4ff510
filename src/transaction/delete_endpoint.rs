//! Defines the endpoint for deleting a transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{AppState, Error, alert::Alert};

use super::{
    filter::{filter_by_month, summarize},
    ledger_page::{LedgerQuery, current_local_date},
    store::TransactionStore,
    view::summary_section,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The transaction ledger.
    pub ledger: Arc<Mutex<TransactionStore>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for deleting a transaction.
///
/// Responds with an empty fragment that replaces the deleted table row, plus
/// an out-of-band swap that refreshes the totals for the month in `query`.
/// Deleting an ID that is no longer in the ledger gets the same response: the
/// outcome the user asked for already holds.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<String>,
    Query(query): Query<LedgerQuery>,
) -> Response {
    let today = match current_local_date(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => {
            tracing::error!("Invalid timezone {}", state.local_timezone);
            return error.into_alert_response();
        }
    };
    let filter = query.resolve(today);

    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LedgerLock.into_alert_response();
        }
    };

    let write_failed = match ledger.remove(&transaction_id) {
        Ok(_) => false,
        Err(Error::StorageWrite(details)) => {
            tracing::warn!("ledger file write failed: {details}");
            true
        }
        Err(error) => return error.into_alert_response(),
    };

    let summary = summarize(&filter_by_month(ledger.all(), filter));

    let body = html! {
        (summary_section(summary, true))

        @if write_failed {
            (Alert::warning(
                "Changes may not be saved",
                "The transaction was removed, but the ledger file could not be written. \
                Your changes may not survive a restart of the server.",
            )
            .into_oob_html())
        }
    };

    (StatusCode::OK, body).into_response()
}
