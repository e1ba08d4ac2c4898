//! Savings plan model
//!
//! A savings plan is derived from the user's figures and never stored on its
//! own. It becomes persistent only when promoted to a purchase goal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::month::MonthKey;

/// Inputs to the savings projection
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    /// What the user is saving for
    pub item: String,
    pub target_amount: Money,
    pub monthly_income: Money,
    pub fixed_expenses: Money,
    pub estimated_variable_expenses: Money,
    /// Monthly saving chosen by the user instead of the suggested one
    pub custom_monthly_saving: Option<Money>,
}

/// Longest schedule the planner will project, in months
pub const MAX_PLAN_MONTHS: u32 = 1200;

/// Validation errors for plan requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanValidationError {
    EmptyItem,
    TargetBelowMinimum { target: Money, minimum: Money },
    NonPositiveIncome,
    NegativeExpenses,
    NonPositiveCustomSaving,
    PlanTooLong { months: u64, limit: u32 },
}

impl fmt::Display for PlanValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyItem => write!(f, "Item to save for cannot be empty"),
            Self::TargetBelowMinimum { target, minimum } => {
                write!(f, "Target amount {} is below the minimum of {}", target, minimum)
            }
            Self::NonPositiveIncome => write!(f, "Monthly income must be greater than zero"),
            Self::NegativeExpenses => write!(f, "Expenses cannot be negative"),
            Self::NonPositiveCustomSaving => {
                write!(f, "Custom monthly saving must be greater than zero")
            }
            Self::PlanTooLong { months, limit } => write!(
                f,
                "Reaching the target would take {} months; plans are limited to {} months",
                months, limit
            ),
        }
    }
}

impl std::error::Error for PlanValidationError {}

impl PlanRequest {
    /// Validate user input before computing a plan
    pub fn validate(&self, minimum_target: Money) -> Result<(), PlanValidationError> {
        if self.item.trim().is_empty() {
            return Err(PlanValidationError::EmptyItem);
        }
        if !self.target_amount.is_positive() || self.target_amount < minimum_target {
            return Err(PlanValidationError::TargetBelowMinimum {
                target: self.target_amount,
                minimum: minimum_target,
            });
        }
        if !self.monthly_income.is_positive() {
            return Err(PlanValidationError::NonPositiveIncome);
        }
        if self.fixed_expenses.is_negative() || self.estimated_variable_expenses.is_negative() {
            return Err(PlanValidationError::NegativeExpenses);
        }
        if let Some(saving) = self.custom_monthly_saving {
            if !saving.is_positive() {
                return Err(PlanValidationError::NonPositiveCustomSaving);
            }
            let target = self.target_amount.cents();
            let months = ((target + saving.cents() - 1) / saving.cents()) as u64;
            if months > u64::from(MAX_PLAN_MONTHS) {
                return Err(PlanValidationError::PlanTooLong {
                    months,
                    limit: MAX_PLAN_MONTHS,
                });
            }
        }
        Ok(())
    }
}

/// One month of a savings schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBreakdown {
    pub month: MonthKey,
    pub month_label: String,
    pub planned_amount: Money,
    /// Total saved after this month, capped at the target
    pub cumulative_total: Money,
    /// Progress toward the target, capped at 100
    pub percent_complete: f64,
}

/// A projected plan for saving toward a purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsPlan {
    pub item: String,
    pub target_amount: Money,
    pub months_needed: u32,
    pub monthly_saving: Money,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub breakdown: Vec<MonthlyBreakdown>,
    pub monthly_surplus: Money,
    pub suggested_saving: Money,
}

/// Conditions worth confirming with the user before committing to a plan
#[derive(Debug, Clone, PartialEq)]
pub enum PlanWarning {
    /// The plan takes longer than the configured horizon
    LongHorizon { months: u32, limit: u32 },
    /// The monthly saving eats most of the surplus
    AggressiveSaving { saving: Money, surplus: Money },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LongHorizon { months, limit } => write!(
                f,
                "This goal takes {} months, more than {} months to reach",
                months, limit
            ),
            Self::AggressiveSaving { saving, surplus } => write!(
                f,
                "Saving {} per month uses most of your {} monthly surplus",
                saving, surplus
            ),
        }
    }
}

impl SavingsPlan {
    /// Warnings for long horizons or savings above `aggressive_ratio` of the surplus
    pub fn warnings(&self, horizon_months: u32, aggressive_ratio: f64) -> Vec<PlanWarning> {
        let mut warnings = Vec::new();
        if self.months_needed > horizon_months {
            warnings.push(PlanWarning::LongHorizon {
                months: self.months_needed,
                limit: horizon_months,
            });
        }
        if self.monthly_saving > self.monthly_surplus.scale(aggressive_ratio) {
            warnings.push(PlanWarning::AggressiveSaving {
                saving: self.monthly_saving,
                surplus: self.monthly_surplus,
            });
        }
        warnings
    }

    /// The final month of the schedule
    pub fn last_month(&self) -> Option<&MonthlyBreakdown> {
        self.breakdown.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PlanRequest {
        PlanRequest {
            item: "Laptop".into(),
            target_amount: Money::from_units(3000),
            monthly_income: Money::from_units(5000),
            fixed_expenses: Money::from_units(2000),
            estimated_variable_expenses: Money::from_units(1500),
            custom_monthly_saving: None,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate(Money::from_units(100)).is_ok());
    }

    #[test]
    fn test_rejects_small_target() {
        let mut req = request();
        req.target_amount = Money::from_units(99);
        assert!(matches!(
            req.validate(Money::from_units(100)),
            Err(PlanValidationError::TargetBelowMinimum { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_item_and_income() {
        let mut req = request();
        req.item = "   ".into();
        assert_eq!(req.validate(Money::zero()), Err(PlanValidationError::EmptyItem));

        let mut req = request();
        req.monthly_income = Money::zero();
        assert_eq!(
            req.validate(Money::zero()),
            Err(PlanValidationError::NonPositiveIncome)
        );
    }

    #[test]
    fn test_rejects_zero_custom_saving() {
        let mut req = request();
        req.custom_monthly_saving = Some(Money::zero());
        assert_eq!(
            req.validate(Money::zero()),
            Err(PlanValidationError::NonPositiveCustomSaving)
        );
    }

    #[test]
    fn test_rejects_custom_saving_that_takes_too_long() {
        let mut req = request();
        req.target_amount = Money::from_units(50_000);
        req.custom_monthly_saving = Some(Money::from_cents(1));
        assert_eq!(
            req.validate(Money::zero()),
            Err(PlanValidationError::PlanTooLong {
                months: 5_000_000,
                limit: MAX_PLAN_MONTHS,
            })
        );
    }

    #[test]
    fn test_warnings() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let plan = SavingsPlan {
            item: "Car".into(),
            target_amount: Money::from_units(40000),
            months_needed: 40,
            monthly_saving: Money::from_units(1000),
            start_date: start,
            end_date: start,
            breakdown: Vec::new(),
            monthly_surplus: Money::from_units(1100),
            suggested_saving: Money::from_units(396),
        };

        let warnings = plan.warnings(36, 0.8);
        assert_eq!(warnings.len(), 2);
        assert!(matches!(warnings[0], PlanWarning::LongHorizon { months: 40, limit: 36 }));
        assert!(matches!(warnings[1], PlanWarning::AggressiveSaving { .. }));

        assert!(plan.warnings(48, 0.95).is_empty());
    }
}
