//! User settings for PocketPlan
//!
//! Stored as `config.json` in the base directory. Every field has a default,
//! so a missing or partial file is valid. API keys are never stored here:
//! the file only names the environment variables that hold them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::PocketPaths;
use crate::error::{PocketError, PocketResult};
use crate::models::Money;

/// User id of the anonymous local profile
pub const LOCAL_USER: &str = "local";

/// Remote object storage for snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteStorageSettings {
    /// Base URL of the storage service; remote storage is off when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Environment variable holding the service API key
    #[serde(default = "default_storage_key_env")]
    pub api_key_env: String,

    /// Environment variable holding the user's access token, if any
    #[serde(default = "default_access_token_env")]
    pub access_token_env: String,
}

impl Default for RemoteStorageSettings {
    fn default() -> Self {
        Self {
            url: None,
            bucket: default_bucket(),
            api_key_env: default_storage_key_env(),
            access_token_env: default_access_token_env(),
        }
    }
}

/// Text-generation backend used for analyses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    #[serde(default = "default_ai_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_ai_model")]
    pub model: String,

    /// Environment variable holding the backend API key
    #[serde(default = "default_ai_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_ai_timeout")]
    pub timeout_secs: u64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            endpoint: default_ai_endpoint(),
            model: default_ai_model(),
            api_key_env: default_ai_key_env(),
            timeout_secs: default_ai_timeout(),
        }
    }
}

/// User settings for PocketPlan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Profile the snapshot belongs to; the local profile when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Days ahead considered "upcoming" on the dashboard
    #[serde(default = "default_upcoming_window")]
    pub upcoming_window_days: u32,

    /// Variable spending estimate as a share of income
    #[serde(default = "default_variable_ratio")]
    pub variable_expense_ratio: f64,

    /// Smallest target accepted by the planner
    #[serde(default = "default_minimum_target")]
    pub minimum_goal_target: Money,

    /// Plans longer than this many months get a warning
    #[serde(default = "default_long_plan_months")]
    pub long_plan_months: u32,

    /// Savings above this share of the surplus get a warning
    #[serde(default = "default_aggressive_ratio")]
    pub aggressive_saving_ratio: f64,

    #[serde(default = "default_notification_interval")]
    pub notification_interval_secs: u64,

    #[serde(default)]
    pub remote: RemoteStorageSettings,

    #[serde(default)]
    pub analysis: AnalysisSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_upcoming_window() -> u32 {
    7
}

fn default_variable_ratio() -> f64 {
    0.30
}

fn default_minimum_target() -> Money {
    Money::from_units(100)
}

fn default_long_plan_months() -> u32 {
    36
}

fn default_aggressive_ratio() -> f64 {
    0.8
}

fn default_notification_interval() -> u64 {
    60
}

fn default_bucket() -> String {
    "expense-manager-data".to_string()
}

fn default_storage_key_env() -> String {
    "POCKETPLAN_STORAGE_KEY".to_string()
}

fn default_access_token_env() -> String {
    "POCKETPLAN_ACCESS_TOKEN".to_string()
}

fn default_ai_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}

fn default_ai_model() -> String {
    "gemini-pro".to_string()
}

fn default_ai_key_env() -> String {
    "POCKETPLAN_AI_KEY".to_string()
}

fn default_ai_timeout() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            user_id: None,
            upcoming_window_days: default_upcoming_window(),
            variable_expense_ratio: default_variable_ratio(),
            minimum_goal_target: default_minimum_target(),
            long_plan_months: default_long_plan_months(),
            aggressive_saving_ratio: default_aggressive_ratio(),
            notification_interval_secs: default_notification_interval(),
            remote: RemoteStorageSettings::default(),
            analysis: AnalysisSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &PocketPaths) -> PocketResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| PocketError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| PocketError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PocketPaths) -> PocketResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PocketError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PocketError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// The configured profile, or the local one
    pub fn user_id(&self) -> &str {
        self.user_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or(LOCAL_USER)
    }

    /// Interval between periodic due-date checks (never below one second)
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.notification_interval_secs.max(1))
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.upcoming_window_days, 7);
        assert_eq!(settings.minimum_goal_target, Money::from_units(100));
        assert_eq!(settings.long_plan_months, 36);
        assert_eq!(settings.user_id(), LOCAL_USER);
        assert_eq!(settings.check_interval(), Duration::from_secs(60));
        assert!(settings.remote.url.is_none());
        assert_eq!(settings.remote.bucket, "expense-manager-data");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path());

        let settings = Settings {
            currency_symbol: "R$".into(),
            user_id: Some("user-42".into()),
            upcoming_window_days: 10,
            ..Default::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.user_id(), "user-42");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), r#"{"variable_expense_ratio": 0.25}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.variable_expense_ratio, 0.25);
        assert_eq!(loaded.aggressive_saving_ratio, 0.8);
        assert_eq!(loaded.analysis.model, "gemini-pro");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, PocketError::Config(_)));
    }
}
