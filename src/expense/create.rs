//! Defines the endpoint for creating a new expense.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::html;

use crate::{
    AppState, Error,
    alert::{Alert, alert_oob},
    expense::{
        ExpenseDraft, ExpenseStore,
        view::{expense_form_view, expenses_section_view},
    },
    timezone::local_today,
};

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    pub expense_store: Arc<Mutex<ExpenseStore>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_store: state.expense_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for creating a new expense.
///
/// On success, responds with the updated expense section, a fresh form and a
/// success alert. Rejected expenses get an error alert and a 400 status.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(draft): Form<ExpenseDraft>,
) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let mut store = match state.expense_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire expense store lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match store.create(&draft) {
        Ok(_) => html! {
            (expenses_section_view(&store.list(), store.total(), true))
            (expense_form_view(today, true))
            (alert_oob(Some(Alert::SuccessSimple {
                message: "Expense added successfully!".to_owned(),
            })))
        }
        .into_response(),
        Err(Error::Validation(error)) => {
            tracing::debug!("Rejected expense: {error}");
            Error::Validation(error).into_alert_response()
        }
        Err(error) => {
            tracing::error!("could not create expense: {error}");
            error.into_alert_response()
        }
    }
}
