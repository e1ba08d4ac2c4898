//! Display formatting for terminal output
//!
//! Plain-text tables and summaries for expenses, incomes, the dashboard,
//! savings plans, goals and AI analyses.

pub mod analysis;
pub mod dashboard;
pub mod expense;
pub mod plan;

pub use analysis::{format_cut_plans, format_expense_review, format_negotiation, format_waste_report};
pub use dashboard::{format_dashboard, format_notification_list};
pub use expense::{format_expense_details, format_expense_list, format_income_list};
pub use plan::{format_goal_analysis, format_goal_details, format_goal_list, format_plan};
