//! The remote collaborator contract.

use async_trait::async_trait;

use invex_core::AppResult;
use invex_core::types::{RequestId, UserId};
use invex_entity::request::{FinancialRequest, RequestKind};
use invex_entity::session::TokenPair;
use invex_entity::user::PendingUser;

/// Everything the console core needs from the backend service.
///
/// Every method resolves to a success payload or an [`invex_core::AppError`]
/// of kind `Remote` carrying the backend's human-readable message when one
/// was provided. Implementations own all transport concerns.
#[async_trait]
pub trait BackendApi: Send + Sync + std::fmt::Debug + 'static {
    /// Exchange credentials for a token pair.
    async fn login(&self, identifier: &str, secret: &str) -> AppResult<TokenPair>;

    /// Announce logout to the backend. Best-effort: local session clearing
    /// must not depend on this succeeding.
    async fn logout(&self) -> AppResult<()>;

    /// List signups awaiting disposition.
    async fn list_pending_users(&self) -> AppResult<Vec<PendingUser>>;

    /// Approve a pending signup, activating the account.
    async fn approve_user(&self, id: &UserId) -> AppResult<()>;

    /// Reject a pending signup, removing the record.
    async fn reject_user(&self, id: &UserId) -> AppResult<()>;

    /// Fetch the full request list for one kind. No server-side status
    /// filtering is assumed; callers filter client-side.
    async fn list_requests(&self, kind: RequestKind) -> AppResult<Vec<FinancialRequest>>;

    /// Approve a request.
    async fn approve_request(&self, kind: RequestKind, id: &RequestId) -> AppResult<()>;

    /// Reject a request. `reason` is already resolved per the kind's
    /// contract: always `Some` for withdrawals, always `None` for deposits.
    async fn reject_request(
        &self,
        kind: RequestKind,
        id: &RequestId,
        reason: Option<&str>,
    ) -> AppResult<()>;
}
