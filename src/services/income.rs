//! Income aggregation
//!
//! Sums income records overall and per calendar month.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{Income, Money, MonthKey};

/// Service for aggregating income records
pub struct IncomeService<'a> {
    incomes: &'a [Income],
}

impl<'a> IncomeService<'a> {
    pub fn new(incomes: &'a [Income]) -> Self {
        Self { incomes }
    }

    /// Sum of every income record, regardless of month
    pub fn total_income(&self) -> Money {
        self.incomes.iter().map(|i| i.amount).sum()
    }

    /// Sum of the records for one month
    pub fn income_for_month(&self, month: MonthKey) -> Money {
        self.incomes
            .iter()
            .filter(|i| i.month == month)
            .map(|i| i.amount)
            .sum()
    }

    /// Sum of the records for the month containing `today`
    pub fn current_month_income(&self, today: NaiveDate) -> Money {
        self.income_for_month(MonthKey::from_date(today))
    }

    /// Monthly totals, oldest month first
    pub fn totals_by_month(&self) -> BTreeMap<MonthKey, Money> {
        let mut totals = BTreeMap::new();
        for income in self.incomes {
            *totals.entry(income.month).or_insert_with(Money::zero) += income.amount;
        }
        totals
    }

    /// Find an income record by ID reference
    pub fn find(&self, reference: &str) -> Option<&'a Income> {
        self.incomes.iter().find(|i| i.id.matches(reference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(y: i32, m: u32) -> MonthKey {
        MonthKey::new(y, m).unwrap()
    }

    fn incomes() -> Vec<Income> {
        vec![
            Income::new(Money::from_units(4000), "Salary", month(2025, 3)),
            Income::new(Money::from_units(800), "Freelance", month(2025, 3)),
            Income::new(Money::from_units(4000), "Salary", month(2025, 2)),
        ]
    }

    #[test]
    fn test_total_income() {
        let incomes = incomes();
        assert_eq!(IncomeService::new(&incomes).total_income(), Money::from_units(8800));
    }

    #[test]
    fn test_current_month_income_sums_sources() {
        let incomes = incomes();
        let service = IncomeService::new(&incomes);
        let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        assert_eq!(service.current_month_income(today), Money::from_units(4800));
        assert_eq!(service.income_for_month(month(2025, 4)), Money::zero());
    }

    #[test]
    fn test_totals_by_month() {
        let incomes = incomes();
        let totals = IncomeService::new(&incomes).totals_by_month();
        let months: Vec<_> = totals.keys().map(|m| m.to_string()).collect();
        assert_eq!(months, vec!["2025-02", "2025-03"]);
        assert_eq!(totals[&month(2025, 3)], Money::from_units(4800));
    }
}
