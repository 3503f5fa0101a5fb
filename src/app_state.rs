//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, expense::ExpenseStore};

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The expenses, loaded once at startup.
    pub expense_store: Arc<Mutex<ExpenseStore>>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState], loading the saved expenses from `db_connection`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the saved expenses cannot be read from the database.
    pub fn new(db_connection: Connection, local_timezone: &str) -> Result<Self, Error> {
        let expense_store = ExpenseStore::load(db_connection)?;

        Ok(Self {
            expense_store: Arc::new(Mutex::new(expense_store)),
            local_timezone: local_timezone.to_owned(),
        })
    }
}
