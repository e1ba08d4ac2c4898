//! Payment ledger
//!
//! Tracks per-expense, per-month paid status. Marking and unmarking are
//! upserts on the (expense, month) key, so repeating a call never creates a
//! second record.

use chrono::{DateTime, Utc};

use crate::models::{Expense, ExpenseId, Money, MonthKey, PaymentRecord};

/// Whether `expense_id` is paid for `month`; false when no record exists
pub fn is_paid(records: &[PaymentRecord], expense_id: ExpenseId, month: MonthKey) -> bool {
    find_record(records, expense_id, month).is_some_and(|r| r.paid)
}

/// The record for an (expense, month) pair, if any
pub fn find_record(
    records: &[PaymentRecord],
    expense_id: ExpenseId,
    month: MonthKey,
) -> Option<&PaymentRecord> {
    records.iter().find(|r| r.is_for(expense_id, month))
}

/// Mutable view over a user's payment history
pub struct PaymentLedger<'a> {
    records: &'a mut Vec<PaymentRecord>,
}

impl<'a> PaymentLedger<'a> {
    pub fn new(records: &'a mut Vec<PaymentRecord>) -> Self {
        Self { records }
    }

    /// Mark an expense as paid for a month
    ///
    /// The paid value defaults to the expense's current value. An existing
    /// record is updated in place; otherwise one is appended.
    pub fn mark_paid(
        &mut self,
        expense: &Expense,
        month: MonthKey,
        paid_amount: Option<Money>,
        now: DateTime<Utc>,
    ) -> PaymentRecord {
        let paid_value = paid_amount.unwrap_or(expense.value);

        match self
            .records
            .iter_mut()
            .find(|r| r.is_for(expense.id, month))
        {
            Some(record) => {
                record.mark_paid(paid_value, now);
                record.clone()
            }
            None => {
                let record = PaymentRecord::paid(expense.id, month, paid_value, now);
                self.records.push(record.clone());
                record
            }
        }
    }

    /// Clear the paid status for a month
    ///
    /// Returns false (and changes nothing) when no record exists.
    pub fn unmark_paid(&mut self, expense_id: ExpenseId, month: MonthKey) -> bool {
        match self
            .records
            .iter_mut()
            .find(|r| r.is_for(expense_id, month))
        {
            Some(record) => {
                record.mark_unpaid();
                true
            }
            None => false,
        }
    }

    /// Drop every record of a deleted expense, returning how many were removed
    pub fn remove_expense(&mut self, expense_id: ExpenseId) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.expense_id != expense_id);
        before - self.records.len()
    }
}
