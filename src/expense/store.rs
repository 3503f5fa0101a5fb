//! The in-memory record of expenses and its durable copy.

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    Error,
    expense::{Expense, ExpenseDraft, ExpenseId, MAX_TOTAL, ValidationError},
    local_storage::{create_local_storage_table, get_item, set_item},
};

/// The local storage key that holds the JSON-encoded list of expenses.
pub const EXPENSES_KEY: &str = "expenses";

/// Whether the user has agreed to a destructive action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The action has been requested but the user has not agreed to it yet.
    Required,
    /// The user agreed to the action.
    Granted,
}

/// The result of asking the store to delete an expense.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// The expense exists, ask the user and try again with [Confirmation::Granted].
    ConfirmationRequired(Expense),
    /// The expense was removed.
    Deleted(Expense),
    /// No expense has the requested ID. Nothing was changed.
    NotFound,
}

/// Owns the list of expenses and keeps the durable copy in sync with it.
///
/// Expenses are kept in the order they were created. Every change is written
/// to local storage before it is applied in memory, so a failed write leaves
/// the store unchanged.
#[derive(Debug)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    connection: Connection,
}

impl ExpenseStore {
    /// Load the expenses saved in the database behind `connection`.
    ///
    /// Missing or malformed saved data is treated as an empty list.
    ///
    /// # Errors
    /// Returns an error if the storage table cannot be created or read.
    pub fn load(connection: Connection) -> Result<Self, Error> {
        create_local_storage_table(&connection)?;

        let expenses = match get_item(EXPENSES_KEY, &connection)? {
            None => Vec::new(),
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|error| {
                tracing::warn!("Ignoring malformed saved expenses: {error}");
                Vec::new()
            }),
        };

        tracing::info!("Loaded {} expense(s) from local storage", expenses.len());

        Ok(Self {
            expenses,
            connection,
        })
    }

    /// Validate `draft` and save it as a new expense.
    ///
    /// # Errors
    /// Returns [Error::Validation] if the draft breaks one of the rules for
    /// new expenses, or a storage error if the expenses could not be saved.
    pub fn create(&mut self, draft: &ExpenseDraft) -> Result<Expense, Error> {
        self.create_at(draft, OffsetDateTime::now_utc())
    }

    fn create_at(&mut self, draft: &ExpenseDraft, now: OffsetDateTime) -> Result<Expense, Error> {
        let draft = draft.validate()?;

        if self.total() + draft.amount > MAX_TOTAL {
            return Err(ValidationError::TotalTooLarge.into());
        }

        let expense = Expense {
            id: self.next_id(now),
            name: draft.name,
            amount: draft.amount,
            description: draft.description,
            date: draft.date,
        };

        let mut expenses = self.expenses.clone();
        expenses.push(expense.clone());
        self.save(&expenses)?;
        self.expenses = expenses;

        tracing::info!("Created expense {}", expense.id);

        Ok(expense)
    }

    /// Delete the expense with `id`.
    ///
    /// Deletion takes two calls: the first with [Confirmation::Required]
    /// only checks the expense exists, the second with
    /// [Confirmation::Granted] removes it. Unknown IDs are not an error.
    ///
    /// # Errors
    /// Returns a storage error if the expenses could not be saved.
    pub fn delete(
        &mut self,
        id: &ExpenseId,
        confirmation: Confirmation,
    ) -> Result<DeleteOutcome, Error> {
        let Some(expense) = self.get(id).cloned() else {
            tracing::debug!("Ignoring request to delete missing expense {id}");
            return Ok(DeleteOutcome::NotFound);
        };

        if confirmation == Confirmation::Required {
            return Ok(DeleteOutcome::ConfirmationRequired(expense));
        }

        let expenses: Vec<Expense> = self
            .expenses
            .iter()
            .filter(|expense| &expense.id != id)
            .cloned()
            .collect();
        self.save(&expenses)?;
        self.expenses = expenses;

        tracing::info!("Deleted expense {id}");

        Ok(DeleteOutcome::Deleted(expense))
    }

    /// Get the expense with `id`, if there is one.
    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| &expense.id == id)
    }

    /// All expenses, most recent date first.
    ///
    /// Expenses on the same date stay in the order they were created.
    pub fn list(&self) -> Vec<&Expense> {
        let mut expenses: Vec<&Expense> = self.expenses.iter().collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        expenses
    }

    /// The sum of all expense amounts, unrounded.
    ///
    /// The amounts are added in the order of [ExpenseStore::list] so the
    /// result is exactly the sum of the listed amounts.
    pub fn total(&self) -> f64 {
        self.list().iter().map(|expense| expense.amount).sum()
    }

    /// The number of expenses.
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    /// Whether there are no expenses.
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Pick an ID from the creation time, moving forward a millisecond at a
    /// time until it does not clash with an existing expense.
    fn next_id(&self, now: OffsetDateTime) -> ExpenseId {
        let mut millis = now.unix_timestamp_nanos() / 1_000_000;

        loop {
            let id = ExpenseId::from_millis(millis);

            if self.get(&id).is_none() {
                return id;
            }

            millis += 1;
        }
    }

    fn save(&self, expenses: &[Expense]) -> Result<(), Error> {
        let json = serde_json::to_string(expenses)
            .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

        set_item(EXPENSES_KEY, &json, &self.connection)
    }
}
