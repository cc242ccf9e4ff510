//! Application router configuration.

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::{
    AppState, endpoints,
    not_found::get_404_not_found,
    transaction::{create_transaction_endpoint, delete_transaction_endpoint, get_ledger_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::LEDGER_VIEW, get(get_ledger_page))
        .route(endpoints::TRANSACTIONS_API, post(create_transaction_endpoint))
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}
