//! The expense tracker page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    expense::{ExpenseStore, view::expense_page_view},
    timezone::local_today,
};

/// The state needed for the expense tracker page.
#[derive(Debug, Clone)]
pub struct ExpensePageState {
    pub expense_store: Arc<Mutex<ExpenseStore>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExpensePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_store: state.expense_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the form, the total and the table of expenses.
pub async fn get_expense_page(State(state): State<ExpensePageState>) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    let store = state
        .expense_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire expense store lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    Ok(expense_page_view(&store.list(), store.total(), today).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use rusqlite::Connection;

    use crate::{
        endpoints,
        expense::{ExpenseDraft, ExpenseStore, get_expense_page},
        test_utils::{
            assert_content_type, assert_form_input, assert_form_input_with_value,
            assert_hx_endpoint, assert_valid_html, expense_rows, must_get_form,
            parse_html_document, total_text,
        },
        timezone::local_today,
    };

    use super::ExpensePageState;

    fn get_page_state() -> ExpensePageState {
        let connection = Connection::open_in_memory().unwrap();

        ExpensePageState {
            expense_store: Arc::new(Mutex::new(ExpenseStore::load(connection).unwrap())),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn render_page() {
        let state = get_page_state();

        let response = get_expense_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::EXPENSES_API, "hx-post");
        assert_form_input(&form, "name", "text", true);
        assert_form_input(&form, "amount", "number", true);
        assert_form_input(&form, "description", "text", false);
        assert_form_input(&form, "date", "date", true);
        assert_eq!(total_text(&html), "₹0.00");
        assert!(expense_rows(&html).is_empty());
    }

    #[tokio::test]
    async fn date_defaults_to_today() {
        let state = get_page_state();
        let today = local_today("Etc/UTC").unwrap();

        let response = get_expense_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        let form = must_get_form(&html);
        assert_form_input_with_value(&form, "date", &today.to_string());
    }

    #[tokio::test]
    async fn lists_expenses_newest_first_with_total() {
        let state = get_page_state();
        {
            let mut store = state.expense_store.lock().unwrap();
            for (name, amount, date) in [
                ("Old", "1.25", "2024-01-10"),
                ("New", "2.50", "2024-03-01"),
                ("Middle", "3", "2024-02-05"),
            ] {
                store
                    .create(&ExpenseDraft {
                        name: name.to_owned(),
                        amount: amount.to_owned(),
                        description: String::new(),
                        date: date.to_owned(),
                    })
                    .unwrap();
            }
        }

        let response = get_expense_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        let names: Vec<String> = expense_rows(&html)
            .iter()
            .map(|row| {
                row.select(&scraper::Selector::parse("td").unwrap())
                    .next()
                    .unwrap()
                    .text()
                    .collect::<String>()
            })
            .collect();
        assert_eq!(names, vec!["New", "Middle", "Old"]);
        assert_eq!(total_text(&html), "₹6.75");
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error() {
        let mut state = get_page_state();
        state.local_timezone = "Not/A_Timezone".to_owned();

        let result = get_expense_page(State(state)).await;

        assert!(result.is_err());
    }
}
