//! Local snapshot file
//!
//! One JSON document per data directory. The local profile is shared by
//! whoever runs the binary, so the user id is not part of the file name.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::file_io::{read_json_optional, write_json_atomic};
use super::SnapshotStore;
use crate::config::PocketPaths;
use crate::error::PocketResult;
use crate::models::Snapshot;

/// Snapshot store backed by a JSON file on disk
#[derive(Debug, Clone)]
pub struct LocalSnapshotStore {
    path: PathBuf,
}

impl LocalSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store at the standard location under `paths`
    pub fn at(paths: &PocketPaths) -> Self {
        Self::new(paths.snapshot_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for LocalSnapshotStore {
    fn save(&self, user_id: &str, snapshot: &Snapshot) -> PocketResult<()> {
        debug!(user = user_id, path = %self.path.display(), "writing local snapshot");
        write_json_atomic(&self.path, snapshot)
    }

    fn load(&self, user_id: &str) -> PocketResult<Option<Snapshot>> {
        debug!(user = user_id, path = %self.path.display(), "reading local snapshot");
        read_json_optional(&self.path)
    }

    fn describe(&self) -> String {
        format!("local file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Expense, ExpenseCategory, Income, Money, MonthKey, Notification, NotificationKind,
        PaymentRecord,
    };
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalSnapshotStore::at(&PocketPaths::with_base_dir(temp_dir.path()));
        assert!(store.load("local").unwrap().is_none());
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalSnapshotStore::at(&PocketPaths::with_base_dir(temp_dir.path()));

        let mut snapshot = Snapshot::default();
        let rent = Expense::new("Rent", Money::from_units(1200), ExpenseCategory::Housing).with_due_day(5);
        let march = MonthKey::new(2025, 3).unwrap();
        snapshot.payment_history.push(PaymentRecord::paid(
            rent.id,
            march,
            Money::from_cents(118_050),
            Utc::now(),
        ));
        let mut unpaid = PaymentRecord::paid(rent.id, march.next(), Money::from_units(1200), Utc::now());
        unpaid.mark_unpaid();
        snapshot.payment_history.push(unpaid);
        snapshot.expenses.push(rent);
        snapshot.incomes.push(Income::new(
            Money::from_units(4000),
            "Salary",
            MonthKey::new(2025, 3).unwrap(),
        ));
        for message in ["newest", "middle", "oldest"] {
            snapshot
                .notifications
                .push(Notification::new(NotificationKind::DueDate, message, Utc::now()));
        }

        store.save("local", &snapshot).unwrap();
        let loaded = store.load("local").unwrap().unwrap();

        assert_eq!(loaded, snapshot);
        let messages: Vec<_> = loaded.notifications.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["newest", "middle", "oldest"]);

        assert_eq!(loaded.payment_history.len(), 2);
        let paid = &loaded.payment_history[0];
        assert!(paid.paid);
        assert_eq!(paid.month, march);
        assert_eq!(paid.paid_value, Some(Money::from_cents(118_050)));
        assert!(!loaded.payment_history[1].paid);
        assert_eq!(loaded.payment_history[1].paid_date, None);
    }
}
