//! Purchase goals
//!
//! A goal is a savings plan the user committed to. Monthly progress records
//! track how much was actually set aside.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::GoalId;
use super::money::Money;
use super::month::MonthKey;
use super::plan::SavingsPlan;

/// Lifecycle status of a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Paused,
    Cancelled,
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Paused => "paused",
            Self::Cancelled => "cancelled",
        };
        f.pad(label)
    }
}

impl FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "completed" | "done" => Ok(Self::Completed),
            "paused" => Ok(Self::Paused),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(format!("Unknown goal status '{}'", other)),
        }
    }
}

/// Priority of a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for GoalPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        f.pad(label)
    }
}

impl FromStr for GoalPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("Unknown priority '{}'", other)),
        }
    }
}

/// Validation errors for goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyItem,
    NonPositiveTarget,
    NonPositiveSaving,
    NegativeSaved,
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyItem => write!(f, "Goal item cannot be empty"),
            Self::NonPositiveTarget => write!(f, "Goal target must be greater than zero"),
            Self::NonPositiveSaving => write!(f, "Monthly saving must be greater than zero"),
            Self::NegativeSaved => write!(f, "Saved amount cannot be negative"),
        }
    }
}

impl std::error::Error for GoalValidationError {}

/// A committed purchase goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseGoal {
    pub id: GoalId,
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub target_amount: Money,
    pub monthly_saving: Money,
    #[serde(default)]
    pub current_saved: Money,
    pub start_date: NaiveDate,
    pub estimated_end_date: NaiveDate,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub priority: GoalPriority,
    /// Free-form category label such as "electronics" or "travel"
    #[serde(default = "default_goal_category")]
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_goal_category() -> String {
    "other".to_string()
}

impl PurchaseGoal {
    /// Promote a computed plan into a goal
    pub fn from_plan(plan: &SavingsPlan, now: DateTime<Utc>) -> Self {
        Self {
            id: GoalId::new(),
            item: plan.item.clone(),
            description: None,
            target_amount: plan.target_amount,
            monthly_saving: plan.monthly_saving,
            current_saved: Money::zero(),
            start_date: plan.start_date,
            estimated_end_date: plan.end_date,
            status: GoalStatus::Active,
            priority: GoalPriority::Medium,
            category: default_goal_category(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == GoalStatus::Active
    }

    /// Saved so far as a percentage of the target (not capped)
    pub fn progress_percent(&self) -> f64 {
        self.current_saved.percent_of(self.target_amount)
    }

    /// Amount still missing to reach the target
    pub fn remaining(&self) -> Money {
        let remaining = self.target_amount - self.current_saved;
        if remaining.is_negative() {
            Money::zero()
        } else {
            remaining
        }
    }

    /// Installments of `monthly_saving` needed to cover the whole target
    pub fn months_needed(&self) -> Option<u32> {
        self.target_amount.installments_of(self.monthly_saving)
    }

    /// Apply a partial update and bump `updated_at`
    pub fn apply(&mut self, update: GoalUpdate, now: DateTime<Utc>) {
        if let Some(item) = update.item {
            self.item = item;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(target) = update.target_amount {
            self.target_amount = target;
        }
        if let Some(saving) = update.monthly_saving {
            self.monthly_saving = saving;
        }
        if let Some(saved) = update.current_saved {
            self.current_saved = saved;
        }
        if let Some(end) = update.estimated_end_date {
            self.estimated_end_date = end;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        self.updated_at = now;
    }

    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.item.trim().is_empty() {
            return Err(GoalValidationError::EmptyItem);
        }
        if !self.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget);
        }
        if !self.monthly_saving.is_positive() {
            return Err(GoalValidationError::NonPositiveSaving);
        }
        if self.current_saved.is_negative() {
            return Err(GoalValidationError::NegativeSaved);
        }
        Ok(())
    }
}

/// Partial update for a goal
#[derive(Debug, Clone, Default)]
pub struct GoalUpdate {
    pub item: Option<String>,
    pub description: Option<Option<String>>,
    pub target_amount: Option<Money>,
    pub monthly_saving: Option<Money>,
    pub current_saved: Option<Money>,
    pub estimated_end_date: Option<NaiveDate>,
    pub status: Option<GoalStatus>,
    pub priority: Option<GoalPriority>,
    pub category: Option<String>,
}

/// Savings actually set aside for a goal in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsProgress {
    pub goal_id: GoalId,
    pub month: MonthKey,
    pub planned_amount: Money,
    pub actual_amount: Money,
    pub cumulative_total: Money,
    pub percent_complete: f64,
    pub on_track: bool,
}

impl SavingsProgress {
    pub fn is_for(&self, goal_id: GoalId, month: MonthKey) -> bool {
        self.goal_id == goal_id && self.month == month
    }
}
