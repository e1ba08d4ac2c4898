//! Payment records
//!
//! One record per (expense, month) pair tracks whether that month's
//! occurrence of an expense was paid, when, and for how much.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::ExpenseId;
use super::money::Money;
use super::month::MonthKey;

/// Paid/unpaid status of one expense for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub expense_id: ExpenseId,
    pub month: MonthKey,
    pub paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<DateTime<Utc>>,
    /// Amount actually paid, which may differ from the expense's nominal value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_value: Option<Money>,
}

impl PaymentRecord {
    /// Create a record marked as paid
    pub fn paid(
        expense_id: ExpenseId,
        month: MonthKey,
        paid_value: Money,
        paid_date: DateTime<Utc>,
    ) -> Self {
        Self {
            expense_id,
            month,
            paid: true,
            paid_date: Some(paid_date),
            paid_value: Some(paid_value),
        }
    }

    /// Whether this record is for the given expense and month
    pub fn is_for(&self, expense_id: ExpenseId, month: MonthKey) -> bool {
        self.expense_id == expense_id && self.month == month
    }

    pub fn mark_paid(&mut self, paid_value: Money, paid_date: DateTime<Utc>) {
        self.paid = true;
        self.paid_date = Some(paid_date);
        self.paid_value = Some(paid_value);
    }

    pub fn mark_unpaid(&mut self) {
        self.paid = false;
        self.paid_date = None;
        self.paid_value = None;
    }
}
