//! Remote object storage for snapshots
//!
//! Speaks the storage REST protocol of the hosted backend: one object per
//! user at `{bucket}/{user_id}/data.json`, uploaded with upsert semantics.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::debug;

use super::SnapshotStore;
use crate::config::RemoteStorageSettings;
use crate::error::{PocketError, PocketResult};
use crate::models::Snapshot;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Object key of a user's snapshot inside the bucket
pub fn object_path(user_id: &str) -> String {
    format!("{}/data.json", user_id)
}

/// Snapshot store backed by remote object storage
pub struct RemoteSnapshotStore {
    client: Client,
    base_url: String,
    bucket: String,
    api_key: String,
    access_token: Option<String>,
}

impl RemoteSnapshotStore {
    pub fn new(
        base_url: impl Into<String>,
        bucket: impl Into<String>,
        api_key: impl Into<String>,
        access_token: Option<String>,
    ) -> PocketResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PocketError::Remote(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bucket: bucket.into(),
            api_key: api_key.into(),
            access_token,
        })
    }

    /// Build a store from settings, reading credentials from the environment
    ///
    /// Returns `Ok(None)` when no URL is configured.
    pub fn from_settings(settings: &RemoteStorageSettings) -> PocketResult<Option<Self>> {
        let Some(url) = settings.url.as_deref().filter(|u| !u.trim().is_empty()) else {
            return Ok(None);
        };

        let api_key = std::env::var(&settings.api_key_env).map_err(|_| {
            PocketError::Config(format!(
                "Remote storage is configured but {} is not set",
                settings.api_key_env
            ))
        })?;
        let access_token = std::env::var(&settings.access_token_env)
            .ok()
            .filter(|t| !t.is_empty());

        Self::new(url, settings.bucket.clone(), api_key, access_token).map(Some)
    }

    fn object_url(&self, user_id: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            object_path(user_id)
        )
    }

    fn bearer(&self) -> String {
        format!(
            "Bearer {}",
            self.access_token.as_deref().unwrap_or(&self.api_key)
        )
    }
}

impl SnapshotStore for RemoteSnapshotStore {
    fn save(&self, user_id: &str, snapshot: &Snapshot) -> PocketResult<()> {
        let url = self.object_url(user_id);
        debug!(%url, "uploading snapshot");

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", self.bearer())
            .header("x-upsert", "true")
            .json(snapshot)
            .send()
            .map_err(|e| PocketError::Remote(format!("Failed to upload snapshot: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PocketError::Remote(format!(
                "Storage upload returned {}: {}",
                status, body
            )));
        }

        Ok(())
    }

    fn load(&self, user_id: &str) -> PocketResult<Option<Snapshot>> {
        let url = self.object_url(user_id);
        debug!(%url, "downloading snapshot");

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", self.bearer())
            .send()
            .map_err(|e| PocketError::Remote(format!("Failed to download snapshot: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            if is_missing_object(&body) {
                return Ok(None);
            }
            return Err(PocketError::Remote(format!(
                "Storage download returned {}: {}",
                status, body
            )));
        }

        let snapshot = response
            .json()
            .map_err(|e| PocketError::Remote(format!("Failed to parse remote snapshot: {}", e)))?;
        Ok(Some(snapshot))
    }

    fn describe(&self) -> String {
        format!("remote bucket {}", self.bucket)
    }
}

/// Some deployments answer a missing object with a 400 and an embedded 404
fn is_missing_object(body: &str) -> bool {
    let body = body.to_ascii_lowercase();
    body.contains("404") || body.contains("not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RemoteSnapshotStore {
        RemoteSnapshotStore::new("https://storage.example.com/", "expense-manager-data", "anon", None)
            .unwrap()
    }

    #[test]
    fn test_object_url() {
        assert_eq!(
            store().object_url("user-7"),
            "https://storage.example.com/storage/v1/object/expense-manager-data/user-7/data.json"
        );
    }

    #[test]
    fn test_bearer_prefers_access_token() {
        assert_eq!(store().bearer(), "Bearer anon");

        let with_token = RemoteSnapshotStore::new(
            "https://storage.example.com",
            "b",
            "anon",
            Some("user-token".into()),
        )
        .unwrap();
        assert_eq!(with_token.bearer(), "Bearer user-token");
    }

    #[test]
    fn test_missing_object_detection() {
        assert!(is_missing_object(r#"{"statusCode":"404","error":"not_found"}"#));
        assert!(is_missing_object("Object not found"));
        assert!(!is_missing_object(r#"{"error":"permission denied"}"#));
    }

    #[test]
    fn test_unconfigured_is_none() {
        let settings = RemoteStorageSettings::default();
        assert!(RemoteSnapshotStore::from_settings(&settings).unwrap().is_none());
    }
}
