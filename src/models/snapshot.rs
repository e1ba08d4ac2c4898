//! Per-user snapshot document
//!
//! The whole object graph for one user is persisted as a single JSON
//! document. Purchase goals live in their own namespace inside it.

use serde::{Deserialize, Serialize};

use super::analysis::PurchaseGoalAnalysis;
use super::ids::GoalId;
use super::expense::Expense;
use super::goal::{PurchaseGoal, SavingsProgress};
use super::income::Income;
use super::notification::Notification;
use super::payment::PaymentRecord;

/// Current snapshot schema version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Goals, their monthly progress and their analyses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalBook {
    #[serde(default)]
    pub goals: Vec<PurchaseGoal>,
    #[serde(default)]
    pub progress: Vec<SavingsProgress>,
    #[serde(default)]
    pub analyses: Vec<PurchaseGoalAnalysis>,
}

impl GoalBook {
    /// Goals still being saved for
    pub fn active_goals(&self) -> impl Iterator<Item = &PurchaseGoal> {
        self.goals.iter().filter(|g| g.is_active())
    }

    pub fn goal(&self, id: GoalId) -> Option<&PurchaseGoal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// Find a goal by id reference or case-insensitive item name
    pub fn find(&self, reference: &str) -> Option<&PurchaseGoal> {
        self.goals
            .iter()
            .find(|g| g.id.matches(reference))
            .or_else(|| {
                self.goals
                    .iter()
                    .find(|g| g.item.eq_ignore_ascii_case(reference.trim()))
            })
    }

    /// Progress records of a goal, oldest month first
    pub fn progress_for(&self, id: GoalId) -> Vec<&SavingsProgress> {
        let mut records: Vec<_> = self.progress.iter().filter(|p| p.goal_id == id).collect();
        records.sort_by_key(|p| p.month);
        records
    }

    pub fn analysis_for(&self, id: GoalId) -> Option<&PurchaseGoalAnalysis> {
        self.analyses.iter().find(|a| a.goal_id == Some(id))
    }
}

/// Everything persisted for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub payment_history: Vec<PaymentRecord>,
    /// Newest first
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub incomes: Vec<Income>,
    #[serde(default)]
    pub purchase_goals: GoalBook,
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            expenses: Vec::new(),
            payment_history: Vec::new(),
            notifications: Vec::new(),
            incomes: Vec::new(),
            purchase_goals: GoalBook::default(),
        }
    }
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
            && self.payment_history.is_empty()
            && self.notifications.is_empty()
            && self.incomes.is_empty()
            && self.purchase_goals.goals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sections_default() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"darkMode": true}"#).unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
    }

    #[test]
    fn test_section_names() {
        let json = serde_json::to_value(Snapshot::default()).unwrap();
        assert!(json.get("paymentHistory").is_some());
        assert!(json.get("purchaseGoals").is_some());
        assert!(json["purchaseGoals"].get("analyses").is_some());
    }
}
