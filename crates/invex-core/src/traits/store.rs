//! Credential store trait for pluggable session persistence.

use async_trait::async_trait;

use crate::result::AppResult;

/// Well-known key of the primary session credential slot.
pub const ACCESS_TOKEN_KEY: &str = "token";

/// Well-known key of the optional refresh credential slot.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Trait for durable session credential storage (file-backed or in-memory).
///
/// The store holds exactly two string slots: the primary session credential
/// and its optional refresh companion. Writes must be immediately visible to
/// the next read; there is no caching layer between the store and the
/// session oracle. Both slots are always cleared together.
#[async_trait]
pub trait CredentialStore: Send + Sync + std::fmt::Debug + 'static {
    /// Read the primary session credential, if any.
    async fn access_token(&self) -> AppResult<Option<String>>;

    /// Read the refresh credential, if any.
    async fn refresh_token(&self) -> AppResult<Option<String>>;

    /// Persist both slots. A `None` refresh token clears that slot.
    async fn store(&self, access_token: &str, refresh_token: Option<&str>) -> AppResult<()>;

    /// Clear both slots. Must be idempotent.
    async fn clear(&self) -> AppResult<()>;
}
