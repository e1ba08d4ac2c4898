//! Dashboard summary
//!
//! One pass over a snapshot producing the figures shown on the overview:
//! monthly obligation against this month's income, the category split and
//! what falls due soon.

use chrono::NaiveDate;

use super::expense::ExpenseService;
use super::income::IncomeService;
use super::payment::is_paid;
use crate::models::{ExpenseCategory, ExpenseId, Money, MonthKey, Snapshot};

/// An upcoming expense with its paid status for the current month
#[derive(Debug, Clone, PartialEq)]
pub struct DueItem {
    pub expense_id: ExpenseId,
    pub name: String,
    pub value: Money,
    pub category: ExpenseCategory,
    pub due_date: NaiveDate,
    pub days_until_due: i64,
    pub paid: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub month: MonthKey,
    pub total_monthly: Money,
    pub month_income: Money,
    /// Income left after the monthly obligation (may be negative)
    pub balance: Money,
    pub expense_count: usize,
    pub active_count: usize,
    /// Active expenses already paid this month
    pub paid_count: usize,
    pub category_totals: Vec<(ExpenseCategory, Money)>,
    pub upcoming: Vec<DueItem>,
    pub unread_notifications: usize,
    pub active_goals: usize,
}

impl Dashboard {
    pub fn build(snapshot: &Snapshot, window_days: u32, today: NaiveDate) -> Self {
        let month = MonthKey::from_date(today);
        let expenses = ExpenseService::new(&snapshot.expenses);
        let total_monthly = expenses.total_monthly();
        let month_income = IncomeService::new(&snapshot.incomes).current_month_income(today);
        let paid_this_month = |id| is_paid(&snapshot.payment_history, id, month);

        let upcoming = expenses
            .upcoming(window_days, today)
            .into_iter()
            .map(|u| DueItem {
                expense_id: u.expense.id,
                name: u.expense.name.clone(),
                value: u.expense.value,
                category: u.expense.category,
                // Paid status follows the month the due date falls in
                paid: is_paid(
                    &snapshot.payment_history,
                    u.expense.id,
                    MonthKey::from_date(u.due_date),
                ),
                due_date: u.due_date,
                days_until_due: u.days_until_due,
            })
            .collect();

        Self {
            month,
            total_monthly,
            month_income,
            balance: month_income - total_monthly,
            expense_count: snapshot.expenses.len(),
            active_count: expenses.active().count(),
            paid_count: expenses.active().filter(|e| paid_this_month(e.id)).count(),
            category_totals: expenses.category_totals(),
            upcoming,
            unread_notifications: snapshot.notifications.iter().filter(|n| !n.read).count(),
            active_goals: snapshot.purchase_goals.active_goals().count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Income, PaymentRecord};
    use chrono::Utc;

    #[test]
    fn test_dashboard_figures() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let month = MonthKey::from_date(today);

        let rent = Expense::new("Rent", Money::from_units(1200), ExpenseCategory::Housing).with_due_day(12);
        let bus = Expense::new("Bus pass", Money::from_units(80), ExpenseCategory::Transport).with_due_day(1);
        let mut old = Expense::new("Old plan", Money::from_units(50), ExpenseCategory::Subscriptions);
        old.is_active = false;

        let mut snapshot = Snapshot::default();
        snapshot.payment_history.push(PaymentRecord::paid(rent.id, month, Money::from_units(1200), Utc::now()));
        snapshot.expenses = vec![rent, bus, old];
        snapshot.incomes.push(Income::new(Money::from_units(3000), "Salary", month));
        snapshot.incomes.push(Income::new(Money::from_units(999), "Advance", month.next()));

        let dashboard = Dashboard::build(&snapshot, 7, today);
        assert_eq!(dashboard.total_monthly, Money::from_units(1280));
        assert_eq!(dashboard.month_income, Money::from_units(3000));
        assert_eq!(dashboard.balance, Money::from_units(1720));
        assert_eq!(dashboard.expense_count, 3);
        assert_eq!(dashboard.active_count, 2);
        assert_eq!(dashboard.paid_count, 1);
        assert_eq!(dashboard.category_totals.len(), 6);

        assert_eq!(dashboard.upcoming.len(), 1);
        assert_eq!(dashboard.upcoming[0].name, "Rent");
        assert_eq!(dashboard.upcoming[0].days_until_due, 2);
        assert!(dashboard.upcoming[0].paid);
    }
}
