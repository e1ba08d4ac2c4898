//! Service layer for PocketPlan
//!
//! Pure computations over the in-memory collections (aggregation,
//! due-date scanning, savings projection) and the mutating views the
//! [`Tracker`](crate::tracker::Tracker) uses to change them.

pub mod dashboard;
pub mod expense;
pub mod goal;
pub mod income;
pub mod notification;
pub mod payment;
pub mod planner;
pub mod scheduler;

pub use dashboard::{Dashboard, DueItem};
pub use expense::{ExpenseService, UpcomingExpense};
pub use goal::GoalService;
pub use income::IncomeService;
pub use notification::NotificationGenerator;
pub use payment::PaymentLedger;
pub use scheduler::Ticker;
