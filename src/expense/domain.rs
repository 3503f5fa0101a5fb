//! Core expense domain types and the rules for creating expenses.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};

/// An opaque, unique identifier for an expense.
///
/// New IDs are derived from the creation time in milliseconds since the Unix
/// epoch, but callers should not rely on the format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Wrap an existing ID, e.g. one taken from a URL.
    pub fn new(id: &str) -> Self {
        Self(id.to_owned())
    }

    pub(crate) fn from_millis(millis: i128) -> Self {
        Self(millis.to_string())
    }
}

impl AsRef<str> for ExpenseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated, non-empty expense name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct ExpenseName(String);

impl ExpenseName {
    /// Create an expense name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// This function will return [ValidationError::MissingField] if `name` is
    /// empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();

        if name.is_empty() {
            Err(ValidationError::MissingField(RequiredField::Name))
        } else {
            Ok(Self(name.to_owned()))
        }
    }

    /// Create an expense name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for ExpenseName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ExpenseName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseName::new(s)
    }
}

impl Display for ExpenseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single recorded expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique across all stored expenses.
    pub id: ExpenseId,
    /// What the money was spent on.
    pub name: ExpenseName,
    /// Always greater than zero.
    pub amount: f64,
    /// Free text, may be empty.
    #[serde(default)]
    pub description: String,
    /// Serialized as `YYYY-MM-DD`.
    pub date: Date,
}

/// The fields the user submits to create an expense.
///
/// All fields are kept as raw text so that missing and malformed values can
/// be reported as validation errors instead of failing to deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    /// Required.
    #[serde(default)]
    pub name: String,
    /// Required, must parse as a number greater than zero.
    #[serde(default)]
    pub amount: String,
    /// Optional.
    #[serde(default)]
    pub description: String,
    /// Required, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
}

/// Amounts must be less than this.
pub const MAX_AMOUNT: f64 = 1_000_000_000.0;

/// The total of all expenses may not go above this.
pub const MAX_TOTAL: f64 = 999_999_999_999.99;

/// An [ExpenseDraft] that passed validation and only needs an ID.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidatedDraft {
    pub name: ExpenseName,
    pub amount: f64,
    pub description: String,
    pub date: Date,
}

impl ExpenseDraft {
    /// Check the draft against the rules for new expenses.
    ///
    /// Fields are checked in the order name, amount, date and the first
    /// failure is returned.
    pub(crate) fn validate(&self) -> Result<ValidatedDraft, ValidationError> {
        let name = ExpenseName::new(&self.name)?;
        let amount = parse_amount(&self.amount)?;
        let date = parse_date(&self.date)?;

        Ok(ValidatedDraft {
            name,
            amount,
            description: self.description.trim().to_owned(),
            date,
        })
    }
}

fn parse_amount(text: &str) -> Result<f64, ValidationError> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::MissingField(RequiredField::Amount));
    }

    let amount: f64 = text
        .parse()
        .map_err(|_| ValidationError::InvalidAmount(text.to_owned()))?;

    if !amount.is_finite() {
        return Err(ValidationError::InvalidAmount(text.to_owned()));
    }

    if amount <= 0.0 {
        return Err(ValidationError::NonPositiveAmount);
    }

    if amount >= MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge);
    }

    Ok(amount)
}

fn parse_date(text: &str) -> Result<Date, ValidationError> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::MissingField(RequiredField::Date));
    }

    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::InvalidDate(text.to_owned()))
}

/// The fields that must be filled in to create an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    /// The expense name.
    Name,
    /// The expense amount.
    Amount,
    /// The expense date.
    Date,
}

impl Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RequiredField::Name => "name",
            RequiredField::Amount => "amount",
            RequiredField::Date => "date",
        };

        write!(f, "{name}")
    }
}

/// The reasons a new expense can be rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was empty.
    #[error("the {0} field is required")]
    MissingField(RequiredField),

    /// The amount was filled in but is not a finite number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The amount was zero or negative.
    #[error("the amount must be greater than zero")]
    NonPositiveAmount,

    /// The amount was [MAX_AMOUNT] or more.
    #[error("the amount must be less than 1,000,000,000")]
    AmountTooLarge,

    /// Adding the amount would take the total above [MAX_TOTAL].
    #[error("the total cannot go above 999,999,999,999.99")]
    TotalTooLarge,

    /// The date was filled in but is not a `YYYY-MM-DD` date.
    #[error("\"{0}\" is not a valid date, expected YYYY-MM-DD")]
    InvalidDate(String),
}

impl ValidationError {
    /// The message shown to the user when this error occurs.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "Please fill in all required fields!",
            ValidationError::InvalidAmount(_) => "Amount must be a number!",
            ValidationError::NonPositiveAmount => "Amount must be greater than 0!",
            ValidationError::AmountTooLarge => "Amount must be less than ₹1,000,000,000!",
            ValidationError::TotalTooLarge => "This expense would make the total too large!",
            ValidationError::InvalidDate(_) => "Date must be a valid date!",
        }
    }
}
