//! Expense deletion endpoint.
//!
//! Deleting takes two requests. The first one answers with a confirmation
//! prompt and the prompt's yes button sends the second one with
//! `?confirmed=true`, which actually removes the expense.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::{HxReswap, SwapOption};
use maud::html;
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::{Alert, alert_oob, confirmation_prompt},
    endpoints,
    expense::{
        Confirmation, DeleteOutcome, ExpenseId, ExpenseStore,
        view::{EXPENSES_SECTION_ID, expenses_section_view},
    },
};

/// The state needed for deleting an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    pub expense_store: Arc<Mutex<ExpenseStore>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_store: state.expense_store.clone(),
        }
    }
}

/// Query parameters for deleting an expense.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteExpenseQuery {
    /// Set once the user has agreed to delete the expense.
    #[serde(default)]
    pub confirmed: bool,
}

/// Handle a request to delete an expense.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<String>,
    Query(query): Query<DeleteExpenseQuery>,
) -> Response {
    let expense_id = ExpenseId::new(&expense_id);
    let confirmation = if query.confirmed {
        Confirmation::Granted
    } else {
        Confirmation::Required
    };

    let mut store = match state.expense_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire expense store lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let outcome = match store.delete(&expense_id, confirmation) {
        Ok(outcome) => outcome,
        Err(error) => {
            tracing::error!("An unexpected error occurred while deleting expense {expense_id}: {error}");
            return error.into_alert_response();
        }
    };

    match outcome {
        DeleteOutcome::ConfirmationRequired(expense) => {
            let confirm_url = format!(
                "{}?confirmed=true",
                endpoints::format_endpoint(endpoints::EXPENSE, &expense.id)
            );

            confirmation_prompt(
                "Are you sure you want to delete this expense?",
                &confirm_url,
                &format!("#{EXPENSES_SECTION_ID}"),
            )
            .into_response()
        }
        DeleteOutcome::Deleted(_) => html! {
            (expenses_section_view(&store.list(), store.total(), true))
            (alert_oob(Some(Alert::SuccessSimple {
                message: "Expense deleted successfully!".to_owned(),
            })))
        }
        .into_response(),
        // The expense is already gone, so just show the current expenses and clear the prompt.
        DeleteOutcome::NotFound if query.confirmed => html! {
            (expenses_section_view(&store.list(), store.total(), false))
            (alert_oob(None))
        }
        .into_response(),
        DeleteOutcome::NotFound => (HxReswap(SwapOption::None), html! {}).into_response(),
    }
}

#[cfg(test)]
mod delete_expense_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, Query, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        expense::{Expense, ExpenseDraft, ExpenseStore, delete_expense_endpoint},
        test_utils::{
            alert_message, assert_valid_html, expense_rows, get_header, parse_html_fragment,
            total_text,
        },
    };

    use super::{DeleteExpenseQuery, DeleteExpenseState};

    fn get_delete_state() -> DeleteExpenseState {
        let connection = Connection::open_in_memory().unwrap();

        DeleteExpenseState {
            expense_store: Arc::new(Mutex::new(ExpenseStore::load(connection).unwrap())),
        }
    }

    fn create_expense(state: &DeleteExpenseState, name: &str, amount: &str) -> Expense {
        state
            .expense_store
            .lock()
            .unwrap()
            .create(&ExpenseDraft {
                name: name.to_owned(),
                amount: amount.to_owned(),
                description: String::new(),
                date: "2024-01-15".to_owned(),
            })
            .expect("Could not create test expense")
    }

    #[tokio::test]
    async fn first_request_asks_for_confirmation() {
        let state = get_delete_state();
        let expense = create_expense(&state, "Coffee", "3.50");

        let response = delete_expense_endpoint(
            State(state.clone()),
            Path(expense.id.to_string()),
            Query(DeleteExpenseQuery { confirmed: false }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let prompt = html
            .select(&Selector::parse("[role=alertdialog] p").unwrap())
            .next()
            .expect("No confirmation prompt found")
            .text()
            .collect::<String>();
        assert_eq!(prompt, "Are you sure you want to delete this expense?");
        let yes_button = html
            .select(&Selector::parse("button[hx-delete]").unwrap())
            .next()
            .expect("No confirm button found");
        assert_eq!(
            yes_button.value().attr("hx-delete"),
            Some(format!("/api/expenses/{}?confirmed=true", expense.id).as_str())
        );
        assert_eq!(state.expense_store.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn confirmed_request_deletes_expense() {
        let state = get_delete_state();
        let coffee = create_expense(&state, "Coffee", "3.50");
        create_expense(&state, "Lunch", "12.25");

        let response = delete_expense_endpoint(
            State(state.clone()),
            Path(coffee.id.to_string()),
            Query(DeleteExpenseQuery { confirmed: true }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_eq!(expense_rows(&html).len(), 1);
        assert_eq!(total_text(&html), "₹12.25");
        assert_eq!(alert_message(&html), "Expense deleted successfully!");

        let store = state.expense_store.lock().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&coffee.id), None);
    }

    #[tokio::test]
    async fn unknown_id_is_ignored() {
        let state = get_delete_state();
        create_expense(&state, "Coffee", "3.50");

        let response = delete_expense_endpoint(
            State(state.clone()),
            Path("999".to_owned()),
            Query(DeleteExpenseQuery { confirmed: false }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(get_header(&response, "hx-reswap"), "none");
        let html = parse_html_fragment(response).await;
        assert!(
            html.select(&Selector::parse("[role=alertdialog]").unwrap())
                .next()
                .is_none()
        );
        assert_eq!(state.expense_store.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn confirmed_unknown_id_shows_expenses_without_alert() {
        let state = get_delete_state();
        create_expense(&state, "Coffee", "3.50");

        let response = delete_expense_endpoint(
            State(state.clone()),
            Path("999".to_owned()),
            Query(DeleteExpenseQuery { confirmed: true }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_eq!(expense_rows(&html).len(), 1);
        assert_eq!(total_text(&html), "₹3.50");
        assert!(
            html.select(&Selector::parse("[role=alert]").unwrap())
                .next()
                .is_none()
        );
        assert_eq!(state.expense_store.lock().unwrap().len(), 1);
    }
}
