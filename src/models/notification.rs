//! Notification events
//!
//! Notifications are appended by the due-date scan and only ever mutated to
//! flip their read flag.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, NotificationId};

/// Kind of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    DueDate,
    ValueIncrease,
    CategoryLimit,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DueDate => write!(f, "due-date"),
            Self::ValueIncrease => write!(f, "value-increase"),
            Self::CategoryLimit => write!(f, "category-limit"),
        }
    }
}

/// A user-facing notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_id: Option<ExpenseId>,
    /// Days-before-due threshold that produced a due-date notification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u32>,
    /// Local calendar day a due-date alert was raised for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_day: Option<NaiveDate>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: NotificationId::new(),
            kind,
            message: message.into(),
            expense_id: None,
            threshold: None,
            alert_day: None,
            date,
            read: false,
        }
    }

    /// A due-date alert for an expense at a given threshold, raised on local day `day`
    pub fn due_date(
        expense_id: ExpenseId,
        threshold: u32,
        message: impl Into<String>,
        day: NaiveDate,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            expense_id: Some(expense_id),
            threshold: Some(threshold),
            alert_day: Some(day),
            ..Self::new(NotificationKind::DueDate, message, date)
        }
    }

    /// Whether this is the due-date alert for `expense_id` at `threshold` on local day `day`
    ///
    /// Alerts saved without an alert day fall back to the day of their timestamp.
    pub fn is_due_alert(&self, expense_id: ExpenseId, threshold: u32, day: NaiveDate) -> bool {
        self.kind == NotificationKind::DueDate
            && self.expense_id == Some(expense_id)
            && self.threshold == Some(threshold)
            && self.alert_day.unwrap_or_else(|| self.date.date_naive()) == day
    }
}
