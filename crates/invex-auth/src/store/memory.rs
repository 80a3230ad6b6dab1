//! In-memory credential store.

use async_trait::async_trait;
use dashmap::DashMap;

use invex_core::AppResult;
use invex_core::traits::store::{ACCESS_TOKEN_KEY, CredentialStore, REFRESH_TOKEN_KEY};

/// Process-local credential store backed by a concurrent map.
///
/// Used by tests and by embedders that manage persistence themselves.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slots: DashMap<&'static str, String>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn access_token(&self) -> AppResult<Option<String>> {
        Ok(self.slots.get(ACCESS_TOKEN_KEY).map(|v| v.clone()))
    }

    async fn refresh_token(&self) -> AppResult<Option<String>> {
        Ok(self.slots.get(REFRESH_TOKEN_KEY).map(|v| v.clone()))
    }

    async fn store(&self, access_token: &str, refresh_token: Option<&str>) -> AppResult<()> {
        self.slots.insert(ACCESS_TOKEN_KEY, access_token.to_string());
        match refresh_token {
            Some(refresh) => {
                self.slots.insert(REFRESH_TOKEN_KEY, refresh.to_string());
            }
            None => {
                self.slots.remove(REFRESH_TOKEN_KEY);
            }
        }
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        self.slots.remove(ACCESS_TOKEN_KEY);
        self.slots.remove(REFRESH_TOKEN_KEY);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_through_visibility() {
        let store = MemoryCredentialStore::new();
        store.store("access", Some("refresh")).await.unwrap();
        assert_eq!(store.access_token().await.unwrap().as_deref(), Some("access"));
        assert_eq!(store.refresh_token().await.unwrap().as_deref(), Some("refresh"));
    }

    #[tokio::test]
    async fn test_store_without_refresh_clears_the_slot() {
        let store = MemoryCredentialStore::new();
        store.store("first", Some("refresh")).await.unwrap();
        store.store("second", None).await.unwrap();
        assert_eq!(store.access_token().await.unwrap().as_deref(), Some("second"));
        assert_eq!(store.refresh_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let store = MemoryCredentialStore::new();
        store.store("access", Some("refresh")).await.unwrap();
        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.access_token().await.unwrap(), None);
        assert_eq!(store.refresh_token().await.unwrap(), None);
    }
}
