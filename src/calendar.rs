//! Calendar helpers for monthly recurrences
//!
//! Everything here works on calendar dates (`NaiveDate`) rather than instants,
//! so month boundaries never shift with the local timezone. "Today" is always
//! passed in explicitly or read through a [`Clock`].

use chrono::{DateTime, Datelike, Local, Months, NaiveDate, Utc};

use crate::models::MonthKey;

/// Source of the current date and time
pub trait Clock: Send + Sync {
    /// Today's calendar date in the user's timezone
    fn today(&self) -> NaiveDate;

    /// Current instant, used for timestamps
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a given date, used by tests and reproducible runs
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now(&self) -> DateTime<Utc> {
        self.today.and_hms_opt(12, 0, 0).unwrap_or_default().and_utc()
    }
}

/// The date `due_day` falls on within `month`
///
/// Due days past the end of a short month are clamped to its last day, so a
/// bill due on the 31st is due on April 30th.
pub fn due_date_in_month(due_day: u8, month: MonthKey) -> NaiveDate {
    let day = u32::from(due_day.max(1)).min(month.days_in_month());
    NaiveDate::from_ymd_opt(month.year(), month.month(), day).unwrap_or_else(|| month.first_day())
}

/// Next occurrence of a monthly due day, counting today
///
/// If the due day has not passed yet this month (`due_day >= today.day()`) the
/// occurrence is this month, otherwise it rolls into next month.
pub fn next_due_date(due_day: u8, today: NaiveDate) -> NaiveDate {
    let this_month = MonthKey::from_date(today);
    if u32::from(due_day) >= today.day() {
        due_date_in_month(due_day, this_month)
    } else {
        due_date_in_month(due_day, this_month.next())
    }
}

/// Days from `today` until the next occurrence of `due_day`
///
/// Returns 0 on the due day itself and never more than 31.
pub fn days_until_due(due_day: u8, today: NaiveDate) -> i64 {
    (next_due_date(due_day, today) - today).num_days()
}

/// Add calendar months to a date, clamping the day to the target month's length
///
/// Returns `None` when the result falls outside the representable range.
pub fn add_months(date: NaiveDate, n: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_due_today_is_zero() {
        assert_eq!(days_until_due(15, date(2025, 3, 15)), 0);
        assert_eq!(next_due_date(15, date(2025, 3, 15)), date(2025, 3, 15));
    }

    #[test]
    fn test_due_later_this_month() {
        assert_eq!(days_until_due(22, date(2025, 3, 15)), 7);
        assert_eq!(days_until_due(18, date(2025, 3, 15)), 3);
    }

    #[test]
    fn test_due_rolls_into_next_month() {
        // March has 31 days: 15th -> April 10th is 26 days
        assert_eq!(days_until_due(10, date(2025, 3, 15)), 26);
        assert_eq!(next_due_date(10, date(2025, 3, 15)), date(2025, 4, 10));
    }

    #[test]
    fn test_due_rolls_over_year_end() {
        assert_eq!(next_due_date(5, date(2024, 12, 20)), date(2025, 1, 5));
        assert_eq!(days_until_due(5, date(2024, 12, 20)), 16);
    }

    #[test]
    fn test_short_month_clamps_to_last_day() {
        assert_eq!(next_due_date(31, date(2025, 4, 10)), date(2025, 4, 30));
        assert_eq!(days_until_due(31, date(2025, 4, 30)), 0);
        // Jan 31st, due on the 30th: rolls to February, clamped to the 28th
        assert_eq!(next_due_date(30, date(2025, 1, 31)), date(2025, 2, 28));
        assert_eq!(next_due_date(29, date(2024, 2, 10)), date(2024, 2, 29));
    }

    #[test]
    fn test_days_until_due_bounds() {
        let mut today = date(2024, 1, 1);
        while today < date(2025, 1, 1) {
            for due_day in 1..=31u8 {
                let days = days_until_due(due_day, today);
                assert!((0..=31).contains(&days), "{} {} -> {}", today, due_day, days);
                if u32::from(due_day) == today.day() {
                    assert_eq!(days, 0);
                }
            }
            today = today.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_add_months() {
        assert_eq!(add_months(date(2024, 11, 17), 2), Some(date(2025, 1, 17)));
        assert_eq!(add_months(date(2025, 1, 31), 1), Some(date(2025, 2, 28)));
        assert_eq!(add_months(date(2025, 5, 1), 0), Some(date(2025, 5, 1)));
    }

    #[test]
    fn test_add_months_out_of_range() {
        assert_eq!(add_months(NaiveDate::MAX, 1), None);
        assert_eq!(add_months(date(2025, 5, 1), u32::MAX), None);
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::new(date(2025, 6, 1));
        assert_eq!(clock.today(), date(2025, 6, 1));
        assert_eq!(clock.now().date_naive(), date(2025, 6, 1));
    }
}
