//! Configuration module for PocketPlan
//!
//! Path resolution for the data directory and user settings persistence.

pub mod paths;
pub mod settings;

pub use paths::PocketPaths;
pub use settings::{AnalysisSettings, RemoteStorageSettings, Settings};
