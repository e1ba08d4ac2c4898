//! Savings plan projection
//!
//! Given income, fixed expenses and an estimate of variable spending, the
//! planner derives a monthly saving and a month-by-month accumulation
//! schedule for a purchase target. Pure: the result depends only on the
//! request and `today`.

use chrono::NaiveDate;

use crate::calendar::add_months;
use crate::models::{Money, MonthKey, MonthlyBreakdown, PlanRequest, SavingsPlan, MAX_PLAN_MONTHS};

/// Share of the surplus considered safe to commit
pub const SAFETY_MARGIN: f64 = 0.9;

/// Share of the safe surplus suggested as the monthly saving
pub const SAVING_ALLOCATION: f64 = 0.4;

/// Default variable-expense estimate, as a share of income
pub const DEFAULT_VARIABLE_RATIO: f64 = 0.30;

/// Estimate variable spending as a share of monthly income
pub fn estimate_variable_expenses(monthly_income: Money, ratio: f64) -> Money {
    monthly_income.scale(ratio)
}

/// Monthly surplus before any saving is set aside
pub fn monthly_surplus(request: &PlanRequest) -> Money {
    request.monthly_income - request.fixed_expenses - request.estimated_variable_expenses
}

/// Project a savings plan for `request` starting `today`
///
/// Returns `None` when income does not cover expenses, when the monthly
/// saving would not be positive, or when reaching the target would take
/// longer than [`MAX_PLAN_MONTHS`].
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use pocketplan::models::{Money, PlanRequest};
/// use pocketplan::services::planner::project;
///
/// let request = PlanRequest {
///     item: "Bike".into(),
///     target_amount: Money::from_units(600),
///     monthly_income: Money::from_units(3000),
///     fixed_expenses: Money::from_units(1000),
///     estimated_variable_expenses: Money::from_units(900),
///     custom_monthly_saving: Some(Money::from_units(200)),
/// };
/// let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// let plan = project(&request, today).unwrap();
/// assert_eq!(plan.months_needed, 3);
/// ```
pub fn project(request: &PlanRequest, today: NaiveDate) -> Option<SavingsPlan> {
    let surplus = monthly_surplus(request);
    if !surplus.is_positive() {
        return None;
    }

    let safe = surplus.scale(SAFETY_MARGIN);
    let suggested = request
        .custom_monthly_saving
        .unwrap_or_else(|| safe.scale(SAVING_ALLOCATION));
    if !suggested.is_positive() {
        return None;
    }

    let months_needed = request.target_amount.installments_of(suggested)?;
    if months_needed > MAX_PLAN_MONTHS {
        return None;
    }
    let target = request.target_amount;
    let end_date = add_months(today, months_needed)?;

    let mut cumulative = Money::zero();
    let breakdown = (0..months_needed)
        .map(|i| {
            cumulative = (cumulative + suggested).min(target);
            let month = MonthKey::from_date(add_months(today, i)?);
            Some(MonthlyBreakdown {
                month,
                month_label: month.label(),
                planned_amount: suggested,
                cumulative_total: cumulative,
                percent_complete: cumulative.percent_of(target).min(100.0),
            })
        })
        .collect::<Option<Vec<_>>>()?;

    Some(SavingsPlan {
        item: request.item.clone(),
        target_amount: target,
        months_needed,
        monthly_saving: suggested,
        start_date: today,
        end_date,
        breakdown,
        monthly_surplus: surplus,
        suggested_saving: suggested,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()
    }

    fn request(income: i64, fixed: i64, variable: i64, target: i64) -> PlanRequest {
        PlanRequest {
            item: "Laptop".into(),
            target_amount: Money::from_units(target),
            monthly_income: Money::from_units(income),
            fixed_expenses: Money::from_units(fixed),
            estimated_variable_expenses: Money::from_units(variable),
            custom_monthly_saving: None,
        }
    }

    #[test]
    fn test_reference_projection() {
        let plan = project(&request(5000, 2000, 1500, 3000), today()).unwrap();

        assert_eq!(plan.monthly_surplus, Money::from_cents(150_000));
        assert_eq!(plan.monthly_saving, Money::from_cents(54_000));
        assert_eq!(plan.suggested_saving, Money::from_cents(54_000));
        assert_eq!(plan.months_needed, 6);
        assert_eq!(plan.breakdown.len(), 6);

        let fifth = &plan.breakdown[4];
        assert_eq!(fifth.cumulative_total, Money::from_cents(270_000));
        assert!((fifth.percent_complete - 90.0).abs() < 1e-9);

        let last = plan.last_month().unwrap();
        assert_eq!(last.cumulative_total, Money::from_units(3000));
        assert_eq!(last.percent_complete, 100.0);
    }

    #[test]
    fn test_schedule_months_and_dates() {
        let plan = project(&request(5000, 2000, 1500, 3000), today()).unwrap();

        assert_eq!(plan.start_date, today());
        assert_eq!(plan.end_date, NaiveDate::from_ymd_opt(2026, 5, 20).unwrap());
        assert_eq!(plan.breakdown[0].month.to_string(), "2025-11");
        assert_eq!(plan.breakdown[1].month.to_string(), "2025-12");
        assert_eq!(plan.breakdown[2].month.to_string(), "2026-01");
        assert_eq!(plan.breakdown[2].month_label, "Jan/2026");
    }

    #[test]
    fn test_deficit_is_infeasible() {
        assert!(project(&request(1000, 900, 200, 500), today()).is_none());
        assert!(project(&request(1000, 900, 200, 100_000), today()).is_none());
    }

    #[test]
    fn test_zero_surplus_is_infeasible() {
        assert!(project(&request(1000, 700, 300, 500), today()).is_none());
    }

    #[test]
    fn test_custom_saving_overrides_suggestion() {
        let mut req = request(5000, 2000, 1500, 3000);
        req.custom_monthly_saving = Some(Money::from_units(1000));
        let plan = project(&req, today()).unwrap();

        assert_eq!(plan.monthly_saving, Money::from_units(1000));
        assert_eq!(plan.months_needed, 3);
        assert_eq!(plan.monthly_surplus, Money::from_units(1500));
    }

    #[test]
    fn test_non_positive_custom_saving_is_infeasible() {
        let mut req = request(5000, 2000, 1500, 3000);
        req.custom_monthly_saving = Some(Money::zero());
        assert!(project(&req, today()).is_none());
    }

    #[test]
    fn test_tiny_saving_for_large_target_is_infeasible() {
        let mut req = request(5000, 2000, 1500, 50_000);
        req.custom_monthly_saving = Some(Money::from_cents(1));
        assert!(project(&req, today()).is_none());
    }

    #[test]
    fn test_longest_plan_ends_on_schedule() {
        let mut req = request(5000, 2000, 1500, 12_000);
        req.custom_monthly_saving = Some(Money::from_units(10));
        let plan = project(&req, today()).unwrap();

        assert_eq!(plan.months_needed, MAX_PLAN_MONTHS);
        assert_eq!(plan.breakdown.len(), MAX_PLAN_MONTHS as usize);
        assert_eq!(plan.end_date, NaiveDate::from_ymd_opt(2125, 11, 20).unwrap());
        assert!(plan.end_date > plan.start_date);

        req.custom_monthly_saving = Some(Money::from_cents(999));
        assert!(project(&req, today()).is_none());
    }

    #[test]
    fn test_cumulative_never_exceeds_target() {
        let mut req = request(5000, 2000, 1500, 1000);
        req.custom_monthly_saving = Some(Money::from_units(300));
        let plan = project(&req, today()).unwrap();

        assert_eq!(plan.months_needed, 4);
        for entry in &plan.breakdown {
            assert!(entry.cumulative_total <= req.target_amount);
            assert!(entry.percent_complete <= 100.0);
        }
        assert_eq!(plan.breakdown[3].cumulative_total, Money::from_units(1000));
    }

    #[test]
    fn test_projection_is_deterministic() {
        let req = request(4200, 1800, 1260, 2500);
        assert_eq!(project(&req, today()), project(&req, today()));
    }

    #[test]
    fn test_estimate_variable_expenses() {
        assert_eq!(
            estimate_variable_expenses(Money::from_units(5000), DEFAULT_VARIABLE_RATIO),
            Money::from_units(1500)
        );
    }
}
