//! Due-date notification scan
//!
//! Scans active expenses against today's date and emits an alert when an
//! expense is exactly 7, 3 or 0 days from its due date. Alerts already
//! emitted for the same expense, threshold and day are not repeated.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::calendar::days_until_due;
use crate::models::{Expense, Notification};

/// Default days-before-due thresholds
pub const DEFAULT_THRESHOLDS: [u32; 3] = [7, 3, 0];

/// Generates due-date notifications
#[derive(Debug, Clone)]
pub struct NotificationGenerator {
    thresholds: Vec<u32>,
}

impl Default for NotificationGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLDS.to_vec())
    }
}

impl NotificationGenerator {
    pub fn new(thresholds: Vec<u32>) -> Self {
        Self { thresholds }
    }

    /// New alerts for `expenses` as of `today`, skipping any already in `existing`
    pub fn scan(
        &self,
        expenses: &[Expense],
        existing: &[Notification],
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Vec<Notification> {
        let mut emitted: Vec<Notification> = Vec::new();

        for expense in expenses.iter().filter(|e| e.is_active) {
            let Some(due_day) = expense.due_day else {
                continue;
            };
            let days = days_until_due(due_day, today);
            let Some(threshold) = self
                .thresholds
                .iter()
                .copied()
                .find(|t| i64::from(*t) == days)
            else {
                continue;
            };

            // Keyed on the local day the due date was computed from
            let already_sent = existing
                .iter()
                .chain(emitted.iter())
                .any(|n| n.is_due_alert(expense.id, threshold, today));
            if already_sent {
                debug!(expense = %expense.id, threshold, "due alert already emitted today");
                continue;
            }

            emitted.push(Notification::due_date(
                expense.id,
                threshold,
                due_message(expense, threshold),
                today,
                now,
            ));
        }

        emitted
    }
}

/// Message text for a due-date alert
pub fn due_message(expense: &Expense, days: u32) -> String {
    match (days, expense.due_day) {
        (0, _) => format!("{} is due today!", expense.name),
        (1, Some(day)) => format!("{} is due tomorrow (day {})", expense.name, day),
        (n, Some(day)) => format!("{} is due in {} days (day {})", expense.name, n, day),
        (n, None) => format!("{} is due in {} days", expense.name, n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, Money};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now_on(day: NaiveDate) -> DateTime<Utc> {
        day.and_hms_opt(9, 0, 0).unwrap().and_utc()
    }

    fn expense(name: &str, due_day: u8) -> Expense {
        Expense::new(name, Money::from_units(10), ExpenseCategory::Other).with_due_day(due_day)
    }

    #[test]
    fn test_thresholds() {
        let today = date(2025, 6, 10);
        let expenses = vec![
            expense("Seven", 17),
            expense("Three", 13),
            expense("Today", 10),
            expense("Five", 15),
        ];

        let alerts = NotificationGenerator::default().scan(&expenses, &[], today, now_on(today));
        let messages: Vec<_> = alerts.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Seven is due in 7 days (day 17)",
                "Three is due in 3 days (day 13)",
                "Today is due today!",
            ]
        );
        assert_eq!(alerts[0].threshold, Some(7));
        assert_eq!(alerts[2].expense_id, Some(expenses[2].id));
    }

    #[test]
    fn test_inactive_and_undated_are_skipped() {
        let today = date(2025, 6, 10);
        let mut inactive = expense("Paused", 10);
        inactive.is_active = false;
        let mut undated = expense("Undated", 10);
        undated.due_day = None;

        let alerts = NotificationGenerator::default().scan(&[inactive, undated], &[], today, now_on(today));
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_repeated_scan_same_day_is_deduplicated() {
        let today = date(2025, 6, 10);
        let expenses = vec![expense("Rent", 13)];
        let generator = NotificationGenerator::default();

        let first = generator.scan(&expenses, &[], today, now_on(today));
        assert_eq!(first.len(), 1);

        let second = generator.scan(&expenses, &first, today, now_on(today));
        assert!(second.is_empty());
    }

    #[test]
    fn test_same_local_day_across_utc_midnight_is_deduplicated() {
        let today = date(2025, 6, 10);
        let expenses = vec![expense("Rent", 13)];
        let generator = NotificationGenerator::default();

        let evening = today.and_hms_opt(23, 0, 0).unwrap().and_utc();
        let first = generator.scan(&expenses, &[], today, evening);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].alert_day, Some(today));

        // Local date unchanged while the UTC date has rolled over
        let after_utc_midnight = date(2025, 6, 11).and_hms_opt(1, 0, 0).unwrap().and_utc();
        let second = generator.scan(&expenses, &first, today, after_utc_midnight);
        assert!(second.is_empty());
    }

    #[test]
    fn test_next_day_threshold_emits_again() {
        let expenses = vec![expense("Rent", 13)];
        let generator = NotificationGenerator::default();

        let day_one = date(2025, 6, 6);
        let first = generator.scan(&expenses, &[], day_one, now_on(day_one));
        assert_eq!(first[0].threshold, Some(7));

        let day_two = date(2025, 6, 10);
        let second = generator.scan(&expenses, &first, day_two, now_on(day_two));
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].threshold, Some(3));
    }
}
