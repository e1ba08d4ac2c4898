//! Expense aggregation
//!
//! Read-only views over a set of expenses: monthly obligation, category
//! partition and the upcoming due-date window. Inactive expenses never
//! contribute to any of them.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::calendar::{days_until_due, next_due_date};
use crate::models::{Expense, ExpenseCategory, Money};

/// An expense whose due date falls inside the requested window
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingExpense<'a> {
    pub expense: &'a Expense,
    pub days_until_due: i64,
    pub due_date: NaiveDate,
}

/// Service for aggregating expenses
pub struct ExpenseService<'a> {
    expenses: &'a [Expense],
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service over a slice of expenses
    pub fn new(expenses: &'a [Expense]) -> Self {
        Self { expenses }
    }

    /// Active expenses, in input order
    pub fn active(&self) -> impl Iterator<Item = &'a Expense> + 'a {
        self.expenses.iter().filter(|e| e.is_active)
    }

    /// Total monthly obligation of the active expenses
    pub fn total_monthly(&self) -> Money {
        self.active().map(|e| e.value).sum()
    }

    /// Active expenses partitioned by category
    ///
    /// All six categories are always present, empty ones included.
    pub fn by_category(&self) -> BTreeMap<ExpenseCategory, Vec<&'a Expense>> {
        let mut grouped: BTreeMap<ExpenseCategory, Vec<&'a Expense>> = ExpenseCategory::ALL
            .iter()
            .map(|category| (*category, Vec::new()))
            .collect();

        for expense in self.active() {
            grouped.entry(expense.category).or_default().push(expense);
        }

        grouped
    }

    /// Monthly total per category, for all six categories
    pub fn category_totals(&self) -> Vec<(ExpenseCategory, Money)> {
        self.by_category()
            .into_iter()
            .map(|(category, expenses)| (category, expenses.iter().map(|e| e.value).sum()))
            .collect()
    }

    /// Active expenses due within `window_days` of `today`, soonest first
    ///
    /// Ties keep their input order. Expenses without a due day are skipped.
    pub fn upcoming(&self, window_days: u32, today: NaiveDate) -> Vec<UpcomingExpense<'a>> {
        let mut upcoming: Vec<UpcomingExpense<'a>> = self
            .active()
            .filter_map(|expense| {
                let due_day = expense.due_day?;
                let days = days_until_due(due_day, today);
                (0..=i64::from(window_days))
                    .contains(&days)
                    .then(|| UpcomingExpense {
                        expense,
                        days_until_due: days,
                        due_date: next_due_date(due_day, today),
                    })
            })
            .collect();

        upcoming.sort_by_key(|u| u.days_until_due);
        upcoming
    }

    /// Find an expense by ID reference or case-insensitive name
    pub fn find(&self, reference: &str) -> Option<&'a Expense> {
        self.expenses
            .iter()
            .find(|e| e.id.matches(reference))
            .or_else(|| {
                self.expenses
                    .iter()
                    .find(|e| e.name.eq_ignore_ascii_case(reference.trim()))
            })
    }
}
