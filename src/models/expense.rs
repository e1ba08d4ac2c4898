//! Recurring expense model
//!
//! An expense is a monthly obligation anchored to a day of the month rather
//! than to a specific date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ExpenseCategory;
use super::ids::ExpenseId;
use super::money::Money;

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyName,
    NegativeValue,
    DueDayOutOfRange(u8),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Expense name cannot be empty"),
            Self::NegativeValue => write!(f, "Expense value cannot be negative"),
            Self::DueDayOutOfRange(day) => {
                write!(f, "Due day must be between 1 and 31, got {}", day)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// A recurring monthly expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,

    pub name: String,

    /// Nominal monthly value
    pub value: Money,

    /// Day of the month the expense recurs on (1-31)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_day: Option<u8>,

    #[serde(default)]
    pub category: ExpenseCategory,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    #[serde(default = "default_active")]
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Expense {
    /// Create a new active expense
    pub fn new(name: impl Into<String>, value: Money, category: ExpenseCategory) -> Self {
        Self {
            id: ExpenseId::new(),
            name: name.into(),
            value,
            due_day: None,
            category,
            payment_method: None,
            notes: None,
            end_date: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Builder-style due day setter
    pub fn with_due_day(mut self, due_day: u8) -> Self {
        self.due_day = Some(due_day);
        self
    }

    /// Apply a partial update
    pub fn apply(&mut self, update: ExpenseUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(value) = update.value {
            self.value = value;
        }
        if let Some(due_day) = update.due_day {
            self.due_day = due_day;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(method) = update.payment_method {
            self.payment_method = method;
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
        if let Some(end_date) = update.end_date {
            self.end_date = end_date;
        }
        if let Some(active) = update.is_active {
            self.is_active = active;
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyName);
        }
        if self.value.is_negative() {
            return Err(ExpenseValidationError::NegativeValue);
        }
        if let Some(day) = self.due_day {
            if !(1..=31).contains(&day) {
                return Err(ExpenseValidationError::DueDayOutOfRange(day));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Partial update for an expense
///
/// Outer `None` leaves a field untouched; for optional fields `Some(None)`
/// clears the value.
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub name: Option<String>,
    pub value: Option<Money>,
    pub due_day: Option<Option<u8>>,
    pub category: Option<ExpenseCategory>,
    pub payment_method: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub end_date: Option<Option<NaiveDate>>,
    pub is_active: Option<bool>,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.value.is_none()
            && self.due_day.is_none()
            && self.category.is_none()
            && self.payment_method.is_none()
            && self.notes.is_none()
            && self.end_date.is_none()
            && self.is_active.is_none()
    }
}
