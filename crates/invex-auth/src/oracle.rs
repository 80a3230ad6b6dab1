//! Session oracle: authentication and role queries over the credential store.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use invex_core::AppResult;
use invex_core::traits::CredentialStore;
use invex_entity::session::TokenPair;
use invex_entity::user::Role;

use crate::claims::SessionClaims;
use crate::parser;

/// Answers "is the caller authenticated" and "what is the caller's role".
///
/// Constructed over an explicit store handle — there is no process-global
/// session state. The oracle re-reads the store on every query so that a
/// logout or expiry purge elsewhere is observed immediately.
#[derive(Debug, Clone)]
pub struct SessionOracle {
    store: Arc<dyn CredentialStore>,
}

impl SessionOracle {
    /// Create an oracle over the given credential store.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Whether a live session exists.
    ///
    /// True iff a credential is present, decodes, and has not expired.
    /// Detecting an expired credential purges both storage slots before
    /// returning false; the purge is idempotent, so repeated queries on an
    /// expired session are safe.
    pub async fn is_authenticated(&self) -> AppResult<bool> {
        let Some(token) = self.store.access_token().await? else {
            return Ok(false);
        };
        let Ok(claims) = parser::decode_claims(&token) else {
            return Ok(false);
        };
        if claims.is_expired_at(Utc::now()) {
            debug!("Session credential expired; purging both slots");
            self.store.clear().await?;
            return Ok(false);
        }
        Ok(true)
    }

    /// The current session's normalized role, if a decodable credential
    /// exists and carries one.
    pub async fn current_role(&self) -> AppResult<Option<Role>> {
        Ok(self.claims().await?.and_then(|claims| claims.role()))
    }

    /// The decoded claims of the stored credential, if any.
    pub async fn claims(&self) -> AppResult<Option<SessionClaims>> {
        let Some(token) = self.store.access_token().await? else {
            return Ok(None);
        };
        Ok(parser::decode_claims(&token).ok())
    }

    /// Persist a freshly issued token pair (login).
    pub async fn establish(&self, tokens: &TokenPair) -> AppResult<()> {
        self.store
            .store(&tokens.access_token, tokens.refresh_token.as_deref())
            .await
    }

    /// Drop the session (logout). Clears both slots.
    pub async fn clear(&self) -> AppResult<()> {
        self.store.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCredentialStore;

    fn mint(claims: &serde_json::Value) -> String {
        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            claims,
            &jsonwebtoken::EncodingKey::from_secret(b"test-secret"),
        )
        .expect("minting a test credential cannot fail")
    }

    fn oracle() -> (SessionOracle, Arc<dyn CredentialStore>) {
        let store: Arc<dyn CredentialStore> = Arc::new(MemoryCredentialStore::new());
        (SessionOracle::new(Arc::clone(&store)), store)
    }

    #[tokio::test]
    async fn test_no_credential_means_unauthenticated() {
        let (oracle, _) = oracle();
        assert!(!oracle.is_authenticated().await.unwrap());
        assert_eq!(oracle.current_role().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_malformed_credential_is_recovered_as_unauthenticated() {
        let (oracle, store) = oracle();
        store.store("definitely-not-a-jwt", None).await.unwrap();
        assert!(!oracle.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_credential_purges_both_slots() {
        let (oracle, store) = oracle();
        let token = mint(&serde_json::json!({ "rol": ["ROLE_CLIENT"], "exp": 1 }));
        store.store(&token, Some("refresh")).await.unwrap();

        assert!(!oracle.is_authenticated().await.unwrap());
        assert_eq!(store.access_token().await.unwrap(), None);
        assert_eq!(store.refresh_token().await.unwrap(), None);

        // Idempotent on a second query.
        assert!(!oracle.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn test_live_credential_authenticates() {
        let (oracle, store) = oracle();
        let token = mint(&serde_json::json!({
            "rol": ["ROLE_MEDIATOR"],
            "exp": 4_102_444_800i64,
        }));
        store.store(&token, None).await.unwrap();

        assert!(oracle.is_authenticated().await.unwrap());
        assert_eq!(oracle.current_role().await.unwrap(), Some(Role::Mediator));
    }

    #[tokio::test]
    async fn test_credential_without_exp_never_expires_locally() {
        let (oracle, store) = oracle();
        let token = mint(&serde_json::json!({ "roles": ["ADMIN"] }));
        store.store(&token, None).await.unwrap();

        assert!(oracle.is_authenticated().await.unwrap());
        assert_eq!(oracle.current_role().await.unwrap(), Some(Role::Admin));
    }

    #[tokio::test]
    async fn test_establish_and_clear() {
        let (oracle, store) = oracle();
        let pair = TokenPair {
            access_token: mint(&serde_json::json!({ "rol": ["CLIENT"] })),
            refresh_token: Some("refresh".into()),
        };
        oracle.establish(&pair).await.unwrap();
        assert_eq!(oracle.current_role().await.unwrap(), Some(Role::Client));
        assert!(store.refresh_token().await.unwrap().is_some());

        oracle.clear().await.unwrap();
        assert!(!oracle.is_authenticated().await.unwrap());
        assert_eq!(store.refresh_token().await.unwrap(), None);
    }
}
