//! Alert messages for displaying success, warning and error feedback to users.
//!
//! Alerts are rendered as HTML fragments that htmx swaps into the alert
//! container at the bottom of the page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// A dismissible alert message with a summary line and details.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// Feedback for an action that completed.
    Success {
        /// A short summary of what happened.
        message: String,
        /// A longer explanation for the user.
        details: String,
    },
    /// Feedback for an action that completed but needs the user's attention.
    Warning {
        /// A short summary of what happened.
        message: String,
        /// A longer explanation for the user.
        details: String,
    },
    /// Feedback for an action that failed.
    Error {
        /// A short summary of what went wrong.
        message: String,
        /// A longer explanation and suggested fix.
        details: String,
    },
}

impl Alert {
    /// Create a new success alert.
    pub fn success(message: &str, details: &str) -> Self {
        Self::Success {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create a new warning alert.
    pub fn warning(message: &str, details: &str) -> Self {
        Self::Warning {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create a new error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Self::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Success { message, details } => (
                "flex flex-col gap-1 rounded border border-green-300 bg-green-50 px-4 py-3 \
                text-green-800 shadow dark:border-green-800 dark:bg-green-900/40 \
                dark:text-green-200",
                message,
                details,
            ),
            Alert::Warning { message, details } => (
                "flex flex-col gap-1 rounded border border-yellow-300 bg-yellow-50 px-4 py-3 \
                text-yellow-800 shadow dark:border-yellow-700 dark:bg-yellow-900/40 \
                dark:text-yellow-200",
                message,
                details,
            ),
            Alert::Error { message, details } => (
                "flex flex-col gap-1 rounded border border-red-300 bg-red-50 px-4 py-3 \
                text-red-800 shadow dark:border-red-800 dark:bg-red-900/40 dark:text-red-200",
                message,
                details,
            ),
        };

        html! {
            div class=(container_style) role="alert"
            {
                div class="flex items-start justify-between gap-3"
                {
                    span class="font-semibold" { (message) }
                    button
                        type="button"
                        class="font-bold cursor-pointer"
                        aria-label="Dismiss"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }

                @if !details.is_empty() {
                    span class="text-sm" { (details) }
                }
            }
        }
    }

    /// Render the alert wrapped for an htmx out-of-band swap into the alert
    /// container. Use this when the response's main target is not the alert
    /// container itself.
    pub fn into_oob_html(self) -> Markup {
        html! {
            div id="alert-container" hx-swap-oob="innerHTML"
            {
                (self.into_html())
            }
        }
    }

    /// Convert the alert into an HTTP response with the given status code.
    pub fn into_response(self, status_code: StatusCode) -> Response {
        (status_code, self.into_html()).into_response()
    }
}
