//! Income model
//!
//! Income is recorded per source and per calendar month. Several records may
//! share a month; the month's income is their sum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::IncomeId;
use super::money::Money;
use super::month::MonthKey;

/// Validation errors for income records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    NegativeAmount,
    EmptySource,
}

impl std::fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Income amount cannot be negative"),
            Self::EmptySource => write!(f, "Income source cannot be empty"),
        }
    }
}

impl std::error::Error for IncomeValidationError {}

/// Income received from one source in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: IncomeId,
    pub amount: Money,
    pub source: String,
    pub month: MonthKey,
    pub created_at: DateTime<Utc>,
}

impl Income {
    pub fn new(amount: Money, source: impl Into<String>, month: MonthKey) -> Self {
        Self {
            id: IncomeId::new(),
            amount,
            source: source.into(),
            month,
            created_at: Utc::now(),
        }
    }

    /// Apply a partial update
    pub fn apply(&mut self, update: IncomeUpdate) {
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(source) = update.source {
            self.source = source;
        }
        if let Some(month) = update.month {
            self.month = month;
        }
    }

    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        if self.amount.is_negative() {
            return Err(IncomeValidationError::NegativeAmount);
        }
        if self.source.trim().is_empty() {
            return Err(IncomeValidationError::EmptySource);
        }
        Ok(())
    }
}

/// Partial update for an income record
#[derive(Debug, Clone, Default)]
pub struct IncomeUpdate {
    pub amount: Option<Money>,
    pub source: Option<String>,
    pub month: Option<MonthKey>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_negative_amount() {
        let income = Income::new(Money::from_cents(-100), "Salary", MonthKey::new(2025, 1).unwrap());
        assert_eq!(income.validate(), Err(IncomeValidationError::NegativeAmount));
    }

    #[test]
    fn test_validation_empty_source() {
        let income = Income::new(Money::from_cents(100), " ", MonthKey::new(2025, 1).unwrap());
        assert_eq!(income.validate(), Err(IncomeValidationError::EmptySource));
    }

    #[test]
    fn test_apply_update() {
        let mut income = Income::new(Money::from_units(5000), "Salary", MonthKey::new(2025, 1).unwrap());
        income.apply(IncomeUpdate {
            amount: Some(Money::from_units(5500)),
            ..Default::default()
        });
        assert_eq!(income.amount, Money::from_units(5500));
        assert_eq!(income.source, "Salary");
    }

    #[test]
    fn test_serialization() {
        let income = Income::new(Money::from_units(5000), "Salary", MonthKey::new(2025, 1).unwrap());
        let json = serde_json::to_string(&income).unwrap();
        assert!(json.contains("\"month\":\"2025-01\""));
        assert!(json.contains("\"createdAt\""));
        let back: Income = serde_json::from_str(&json).unwrap();
        assert_eq!(back, income);
    }
}
