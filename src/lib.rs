//! A small web app for keeping track of day-to-day expenses.
//!
//! The app serves a single page with a form for recording expenses, a table of
//! the recorded expenses sorted by date and a running total. Expenses are kept
//! in memory by an [ExpenseStore] and mirrored to a local SQLite key-value
//! table after every change.
//!
//! This library provides the HTTP handlers that directly serve the HTML for
//! that page.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::{HxReswap, SwapOption};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod endpoints;
mod expense;
mod html;
mod local_storage;
mod not_found;
mod routing;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use expense::{
    Confirmation, DeleteOutcome, EXPENSES_KEY, Expense, ExpenseDraft, ExpenseId, ExpenseName,
    ExpenseStore, MAX_AMOUNT, MAX_TOTAL, RequiredField, ValidationError,
};
pub use routing::build_router;
pub use timezone::get_local_offset;

use crate::{alert::Alert, html::error_view};

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

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user submitted an expense that breaks one of the rules for
    /// creating expenses. Nothing is stored when this happens.
    #[error("invalid expense: {0}")]
    Validation(#[from] ValidationError),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while serializing the expenses as JSON.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the lock on the expense store.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (description, fix) = match &self {
            Error::InvalidTimezoneError(timezone) => (
                "Invalid Timezone Settings".to_owned(),
                format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    "Sorry, something went wrong.".to_owned(),
                    "Try again later or check the server logs".to_owned(),
                )
            }
        };

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_view("Internal Server Error", "500", &description, &fix),
        )
            .into_response()
    }
}

impl Error {
    /// Render the error as an alert fragment for HTMX requests.
    ///
    /// The response tells HTMX to swap the alert into the inner HTML of its
    /// target, whatever swap style the triggering element asks for.
    fn into_alert_response(self) -> Response {
        let (status, alert) = match self {
            Error::Validation(error) => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: error.user_message().to_owned(),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                        ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details: "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                    },
                )
            }
        };

        (status, HxReswap(SwapOption::InnerHtml), alert).into_response()
    }
}
