//! Expense categories
//!
//! The tracker uses a fixed set of six buckets. Older snapshots used
//! Portuguese keys, which are still accepted when reading.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a recurring expense
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    #[serde(alias = "assinaturas")]
    Subscriptions,
    #[serde(alias = "educacao")]
    Education,
    #[serde(alias = "moradia")]
    Housing,
    #[serde(alias = "transporte")]
    Transport,
    #[serde(alias = "saude")]
    Health,
    #[default]
    #[serde(alias = "outros")]
    Other,
}

impl ExpenseCategory {
    /// All categories, in display order
    pub const ALL: [ExpenseCategory; 6] = [
        Self::Subscriptions,
        Self::Education,
        Self::Housing,
        Self::Transport,
        Self::Health,
        Self::Other,
    ];

    /// Machine key used in snapshots and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Self::Subscriptions => "subscriptions",
            Self::Education => "education",
            Self::Housing => "housing",
            Self::Transport => "transport",
            Self::Health => "health",
            Self::Other => "other",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Subscriptions => "Subscriptions",
            Self::Education => "Education",
            Self::Housing => "Housing",
            Self::Transport => "Transport",
            Self::Health => "Health",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "subscriptions" | "subscription" | "subs" | "assinaturas" => Ok(Self::Subscriptions),
            "education" | "educacao" => Ok(Self::Education),
            "housing" | "home" | "moradia" => Ok(Self::Housing),
            "transport" | "transportation" | "transporte" => Ok(Self::Transport),
            "health" | "saude" => Ok(Self::Health),
            "other" | "others" | "outros" => Ok(Self::Other),
            other => Err(format!(
                "Unknown category '{}'. Expected one of: subscriptions, education, housing, transport, health, other",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_has_six_distinct_categories() {
        let mut keys: Vec<_> = ExpenseCategory::ALL.iter().map(|c| c.key()).collect();
        keys.dedup();
        assert_eq!(keys.len(), 6);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Housing".parse::<ExpenseCategory>().unwrap(), ExpenseCategory::Housing);
        assert_eq!("saude".parse::<ExpenseCategory>().unwrap(), ExpenseCategory::Health);
        assert!("groceries".parse::<ExpenseCategory>().is_err());
    }

    #[test]
    fn test_serialization_and_legacy_keys() {
        let json = serde_json::to_string(&ExpenseCategory::Subscriptions).unwrap();
        assert_eq!(json, "\"subscriptions\"");

        let legacy: ExpenseCategory = serde_json::from_str("\"transporte\"").unwrap();
        assert_eq!(legacy, ExpenseCategory::Transport);
    }
}
