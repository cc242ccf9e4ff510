//! Tallybook is a small web app for keeping a personal ledger of income and
//! expenses.
//!
//! This library provides a REST API that directly serves HTML pages. The
//! ledger is kept in memory and persisted as a single JSON file.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod endpoints;
mod error;
mod html;
mod not_found;
mod routing;
mod state;
mod storage;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use error::Error;
pub use routing::build_router;
pub use state::AppState;
pub use storage::StorageSlot;
pub use transaction::{
    Transaction, TransactionDraft, TransactionId, TransactionKind, TransactionStore,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
