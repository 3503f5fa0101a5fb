//! Recording, listing and deleting expenses.

mod create;
mod delete;
mod domain;
mod page;
mod store;
mod view;

pub use create::create_expense_endpoint;
pub use delete::delete_expense_endpoint;
pub use domain::{
    Expense, ExpenseDraft, ExpenseId, ExpenseName, MAX_AMOUNT, MAX_TOTAL, RequiredField,
    ValidationError,
};
pub use page::get_expense_page;
pub use store::{Confirmation, DeleteOutcome, EXPENSES_KEY, ExpenseStore};
