//! Path management for PocketPlan
//!
//! ## Path Resolution Order
//!
//! 1. `POCKETPLAN_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/pocketplan` or `~/.config/pocketplan`
//! 3. Windows: `%APPDATA%\pocketplan`

use std::path::{Path, PathBuf};

use crate::error::{PocketError, PocketResult};

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "POCKETPLAN_DATA_DIR";

/// File name of the local snapshot
pub const SNAPSHOT_FILE_NAME: &str = "expense-manager-data.json";

/// Manages all paths used by PocketPlan
#[derive(Debug, Clone)]
pub struct PocketPaths {
    base_dir: PathBuf,
}

impl PocketPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> PocketResult<Self> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding the local snapshot
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// The local snapshot document
    pub fn snapshot_file(&self) -> PathBuf {
        self.data_dir().join(SNAPSHOT_FILE_NAME)
    }

    /// Create the base and data directories
    pub fn ensure_directories(&self) -> PocketResult<()> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PocketError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PocketError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> PocketResult<PathBuf> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                PocketError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("pocketplan"))
}

#[cfg(windows)]
fn resolve_default_path() -> PocketResult<PathBuf> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| PocketError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("pocketplan"))
}
