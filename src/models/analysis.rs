//! Analysis results returned by the AI backend
//!
//! The backend's reply is loosely structured, so every field tolerates being
//! absent and falls back to a neutral default. Amounts are plain numbers in
//! currency units as the backend reports them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;

/// Pace of an acceleration scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    #[default]
    Light,
    Moderate,
    Intense,
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Intense => "intense",
        };
        f.pad(label)
    }
}

/// Whether the plan is realistic, and why
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viability {
    #[serde(default = "default_realistic")]
    pub is_realistic: bool,
    /// Estimated chance of success, 0-100
    #[serde(default = "default_probability")]
    pub success_probability: f64,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default = "default_reasoning")]
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<String>>,
}

fn default_realistic() -> bool {
    true
}

fn default_probability() -> f64 {
    70.0
}

fn default_reasoning() -> String {
    "Analysis not available".to_string()
}

impl Default for Viability {
    fn default() -> Self {
        Self {
            is_realistic: default_realistic(),
            success_probability: default_probability(),
            risks: Vec::new(),
            reasoning: default_reasoning(),
            suggested_amount: None,
            alternatives: None,
        }
    }
}

/// A way to reach the goal sooner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccelerationOption {
    #[serde(default)]
    pub scenario: Scenario,
    #[serde(default)]
    pub months_reduced: u32,
    #[serde(default)]
    pub additional_monthly_saving: f64,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// AI assessment of a savings plan, attached to a goal once saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseGoalAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<GoalId>,
    #[serde(default)]
    pub viability: Viability,
    #[serde(default)]
    pub acceleration_options: Vec<AccelerationOption>,
    #[serde(default)]
    pub tips: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// The shape the backend is asked to reply with
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalysisReply {
    #[serde(default)]
    pub viability: Viability,
    #[serde(default)]
    pub acceleration_options: Vec<AccelerationOption>,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl PurchaseGoalAnalysis {
    pub(crate) fn from_reply(reply: AnalysisReply, generated_at: DateTime<Utc>) -> Self {
        Self {
            goal_id: None,
            viability: reply.viability,
            acceleration_options: reply.acceleration_options,
            tips: reply.tips,
            generated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_defaults() {
        let reply: AnalysisReply = serde_json::from_str(r#"{"viability": {}}"#).unwrap();
        assert!(reply.viability.is_realistic);
        assert_eq!(reply.viability.success_probability, 70.0);
        assert_eq!(reply.viability.reasoning, "Analysis not available");
        assert!(reply.acceleration_options.is_empty());
        assert!(reply.tips.is_empty());
    }

    #[test]
    fn test_reply_full() {
        let reply: AnalysisReply = serde_json::from_str(
            r#"{
                "viability": {"isRealistic": false, "successProbability": 35, "risks": ["tight"], "reasoning": "low surplus"},
                "accelerationOptions": [{"scenario": "intense", "monthsReduced": 2, "additionalMonthlySaving": 150.5}],
                "tips": ["cook at home"]
            }"#,
        )
        .unwrap();
        assert!(!reply.viability.is_realistic);
        assert_eq!(reply.acceleration_options[0].scenario, Scenario::Intense);
        assert_eq!(reply.acceleration_options[0].months_reduced, 2);
        assert_eq!(reply.tips, vec!["cook at home".to_string()]);
    }
}
