//! Core data models for PocketPlan
//!
//! Expenses, incomes, payment records, notifications, savings plans and
//! purchase goals, plus the snapshot document that bundles them.

pub mod analysis;
pub mod category;
pub mod expense;
pub mod goal;
pub mod ids;
pub mod income;
pub mod money;
pub mod month;
pub mod notification;
pub mod payment;
pub mod plan;
pub mod snapshot;

pub use analysis::{AccelerationOption, PurchaseGoalAnalysis, Scenario, Viability};
pub use category::ExpenseCategory;
pub use expense::{Expense, ExpenseUpdate, ExpenseValidationError};
pub use goal::{
    GoalPriority, GoalStatus, GoalUpdate, GoalValidationError, PurchaseGoal, SavingsProgress,
};
pub use ids::{ExpenseId, GoalId, IncomeId, NotificationId};
pub use income::{Income, IncomeUpdate, IncomeValidationError};
pub use money::{Money, MoneyParseError};
pub use month::{MonthKey, MonthParseError};
pub use notification::{Notification, NotificationKind};
pub use payment::PaymentRecord;
pub use plan::{
    MonthlyBreakdown, PlanRequest, PlanValidationError, PlanWarning, SavingsPlan, MAX_PLAN_MONTHS,
};
pub use snapshot::{GoalBook, Snapshot, SNAPSHOT_VERSION};
