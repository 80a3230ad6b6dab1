//! Durable file-backed credential store.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use invex_core::traits::store::CredentialStore;
use invex_core::{AppError, AppResult};

/// On-disk layout: one small JSON document holding both slots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedSlots {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

/// Credential store persisting both slots to a JSON file.
///
/// Every read goes back to the file and every write rewrites it, so state
/// survives process restarts and a write is visible to the next read with
/// no in-process cache in between.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store over the given file path. The file itself is created
    /// lazily on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_slots(&self) -> AppResult<PersistedSlots> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::storage(format!(
                    "Corrupt credential file {}: {e}",
                    self.path.display()
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PersistedSlots::default()),
            Err(e) => Err(AppError::storage(format!(
                "Failed to read credential file {}: {e}",
                self.path.display()
            ))),
        }
    }

    async fn write_slots(&self, slots: &PersistedSlots) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::storage(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }
        let json = serde_json::to_vec_pretty(slots)?;
        tokio::fs::write(&self.path, json).await.map_err(|e| {
            AppError::storage(format!(
                "Failed to write credential file {}: {e}",
                self.path.display()
            ))
        })
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn access_token(&self) -> AppResult<Option<String>> {
        Ok(self.read_slots().await?.token)
    }

    async fn refresh_token(&self) -> AppResult<Option<String>> {
        Ok(self.read_slots().await?.refresh_token)
    }

    async fn store(&self, access_token: &str, refresh_token: Option<&str>) -> AppResult<()> {
        self.write_slots(&PersistedSlots {
            token: Some(access_token.to_string()),
            refresh_token: refresh_token.map(String::from),
        })
        .await
    }

    async fn clear(&self) -> AppResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Cleared persisted credentials");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(format!(
                "Failed to clear credential file {}: {e}",
                self.path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("session.json"));

        assert_eq!(store.access_token().await.unwrap(), None);

        store.store("access", Some("refresh")).await.unwrap();
        assert_eq!(store.access_token().await.unwrap().as_deref(), Some("access"));
        assert_eq!(store.refresh_token().await.unwrap().as_deref(), Some("refresh"));

        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.access_token().await.unwrap(), None);
        assert_eq!(store.refresh_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested/deep/session.json"));
        store.store("access", None).await.unwrap();
        assert_eq!(store.access_token().await.unwrap().as_deref(), Some("access"));
        assert_eq!(store.refresh_token().await.unwrap(), None);
    }
}
