//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the tracker.

pub mod analyze;
pub mod expense;
pub mod goal;
pub mod income;
pub mod notify;
pub mod plan;

pub use analyze::{handle_analyze_command, AnalyzeCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use notify::{handle_notify_command, NotifyCommands};
pub use plan::{handle_plan_command, PlanArgs};

use chrono::NaiveDate;
use tracing::debug;

use crate::calendar::{Clock, FixedClock, SystemClock};
use crate::config::{PocketPaths, Settings};
use crate::error::{PocketError, PocketResult};
use crate::models::{Money, MonthKey};
use crate::storage::Storage;
use crate::tracker::{Tracker, TrackerOptions};

/// Freezes "today" for reproducible runs (YYYY-MM-DD)
pub const TODAY_ENV: &str = "POCKETPLAN_TODAY";

/// The system clock, or a fixed one when a date is given
pub fn clock_for(today: Option<NaiveDate>) -> Box<dyn Clock> {
    match today {
        Some(today) => {
            debug!(%today, "using fixed clock");
            Box::new(FixedClock::new(today))
        }
        None => Box::new(SystemClock),
    }
}

/// Open the configured profile through remote-then-local storage
pub fn open_tracker(
    paths: &PocketPaths,
    settings: &Settings,
    today: Option<NaiveDate>,
) -> PocketResult<Tracker> {
    let storage = Storage::from_settings(paths, settings);
    Tracker::load(
        settings.user_id(),
        Box::new(storage),
        clock_for(today),
        TrackerOptions::from(settings),
    )
}

pub(crate) fn parse_money(input: &str) -> PocketResult<Money> {
    Money::parse(input).map_err(|e| PocketError::Validation(format!("Invalid amount: {}", e)))
}

/// Parse `YYYY-MM`, defaulting to the tracker's current month
pub(crate) fn parse_month(input: Option<&str>, tracker: &Tracker) -> PocketResult<MonthKey> {
    match input {
        Some(value) => value
            .parse()
            .map_err(|e| PocketError::Validation(format!("Invalid month: {}", e))),
        None => Ok(tracker.current_month()),
    }
}

pub(crate) fn parse_date(input: &str) -> PocketResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| PocketError::Validation(format!("Invalid date '{}': {}", input, e)))
}

/// Treat an empty string as "clear this field"
pub(crate) fn clearable(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}
