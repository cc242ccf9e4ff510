//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, html::error_view, not_found::get_404_not_found_response};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user submitted an amount that is not a positive, finite number.
    ///
    /// The string is the raw form input that failed validation. Transactions
    /// record money that actually moved, so zero and negative amounts are
    /// rejected along with text that does not parse as a number.
    #[error("\"{0}\" is not a valid transaction amount")]
    InvalidAmount(String),

    /// The ledger file could not be written.
    ///
    /// The in-memory ledger was still updated, so the current session remains
    /// usable. Callers should warn the user that changes may not survive a
    /// restart.
    #[error("could not write the ledger file: {0}")]
    StorageWrite(String),

    /// Could not acquire the ledger lock.
    #[error("could not acquire the ledger lock")]
    LedgerLock,

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The configured timezone is not a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezone(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_view(
                    "Invalid Timezone Settings",
                    "500",
                    "Invalid Timezone Settings",
                    &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings \
                        and ensure the timezone has been set to a valid, canonical timezone string."
                    ),
                ),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_view(
                        "Internal Server Error",
                        "500",
                        "Something went wrong",
                        "An unexpected error occurred, check the server logs for more details.",
                    ),
                )
                    .into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidAmount(raw_amount) => Alert::error(
                "Invalid amount",
                &format!(
                    "\"{raw_amount}\" is not a valid amount. \
                    Enter a positive number such as 42.50 and try again."
                ),
            )
            .into_response(StatusCode::BAD_REQUEST),
            Error::StorageWrite(details) => {
                tracing::warn!("ledger file write failed: {details}");
                Alert::warning(
                    "Changes may not be saved",
                    "The change was applied, but the ledger file could not be written. \
                    Your changes may not survive a restart of the server.",
                )
                .into_response(StatusCode::OK)
            }
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
                .into_response(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
