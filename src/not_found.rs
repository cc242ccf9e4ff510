//! The 404 not found page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// A route handler for unmatched routes.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Render the 404 page as a response.
pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        error_view(
            "Page Not Found",
            "404",
            "Page not found",
            "The page you were looking for does not exist.",
        ),
    )
        .into_response()
}
