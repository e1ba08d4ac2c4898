//! Snapshot persistence for PocketPlan
//!
//! A user's whole state is saved and loaded as one [`Snapshot`]. Remote
//! object storage is tried first when configured; the local JSON file is
//! the fallback for both directions.

pub mod file_io;
pub mod local;
pub mod remote;

pub use file_io::{read_json_optional, write_json_atomic};
pub use local::LocalSnapshotStore;
pub use remote::RemoteSnapshotStore;

use tracing::warn;

use crate::config::{PocketPaths, Settings};
use crate::error::PocketResult;
use crate::models::Snapshot;

/// Somewhere a user's snapshot can be saved to and loaded from
pub trait SnapshotStore {
    fn save(&self, user_id: &str, snapshot: &Snapshot) -> PocketResult<()>;

    /// Load a user's snapshot; `Ok(None)` when nothing has been saved yet
    fn load(&self, user_id: &str) -> PocketResult<Option<Snapshot>>;

    /// Short human description for logs
    fn describe(&self) -> String;
}

/// Remote-first store with a local file fallback
pub struct Storage {
    remote: Option<Box<dyn SnapshotStore + Send>>,
    local: LocalSnapshotStore,
}

impl Storage {
    pub fn new(remote: Option<Box<dyn SnapshotStore + Send>>, local: LocalSnapshotStore) -> Self {
        Self { remote, local }
    }

    /// Local file only
    pub fn local_only(paths: &PocketPaths) -> Self {
        Self::new(None, LocalSnapshotStore::at(paths))
    }

    /// Build from settings; a misconfigured remote is logged and skipped
    pub fn from_settings(paths: &PocketPaths, settings: &Settings) -> Self {
        let remote = match RemoteSnapshotStore::from_settings(&settings.remote) {
            Ok(Some(store)) => Some(Box::new(store) as Box<dyn SnapshotStore + Send>),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "remote storage unavailable, using local file only");
                None
            }
        };
        Self::new(remote, LocalSnapshotStore::at(paths))
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn local(&self) -> &LocalSnapshotStore {
        &self.local
    }
}

impl SnapshotStore for Storage {
    fn save(&self, user_id: &str, snapshot: &Snapshot) -> PocketResult<()> {
        if let Some(remote) = &self.remote {
            match remote.save(user_id, snapshot) {
                Ok(()) => return Ok(()),
                Err(e) => warn!(
                    error = %e,
                    store = %remote.describe(),
                    "remote save failed, falling back to local file"
                ),
            }
        }
        self.local.save(user_id, snapshot)
    }

    fn load(&self, user_id: &str) -> PocketResult<Option<Snapshot>> {
        if let Some(remote) = &self.remote {
            match remote.load(user_id) {
                Ok(Some(snapshot)) => return Ok(Some(snapshot)),
                Ok(None) => {}
                Err(e) => warn!(
                    error = %e,
                    store = %remote.describe(),
                    "remote load failed, falling back to local file"
                ),
            }
        }
        self.local.load(user_id)
    }

    fn describe(&self) -> String {
        match &self.remote {
            Some(remote) => format!("{} (fallback {})", remote.describe(), self.local.describe()),
            None => self.local.describe(),
        }
    }
}
