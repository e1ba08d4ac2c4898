//! Reply shapes for the expense analyses
//!
//! Backends are asked for these shapes but are not trusted to follow them
//! exactly, so every field has a default.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverallAssessment {
    pub ideal_percent: f64,
    pub actual_percent: f64,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Optimisation {
    pub description: String,
    pub potential_saving: f64,
    pub priority: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionItem {
    pub action: String,
    pub impact: String,
}

/// Overall review of recurring expenses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseReview {
    pub overall: OverallAssessment,
    pub top_optimisations: Vec<Optimisation>,
    pub annual_saving_potential: f64,
    pub actions: Vec<ActionItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WasteFinding {
    pub expense_name: String,
    pub problem: String,
    pub potential_saving: f64,
    pub recommended_action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WasteReport {
    pub findings: Vec<WasteFinding>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CutPlan {
    pub level: String,
    pub items: Vec<String>,
    pub total_saving: f64,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CutPlanSet {
    pub plans: Vec<CutPlan>,
}

/// Talking points for negotiating one expense down
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NegotiationScript {
    pub arguments: Vec<String>,
    pub script: String,
    pub competitor_prices: Vec<String>,
    pub reduction_target: f64,
}
