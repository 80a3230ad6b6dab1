//! The pending-user approval queue.

use std::sync::{Arc, RwLock};

use tracing::info;

use invex_client::BackendApi;
use invex_core::types::UserId;
use invex_core::{AppError, AppResult};
use invex_entity::user::{PendingUser, Role};

use crate::processing::ProcessingSlot;

/// Drives the disposition of signups awaiting approval.
///
/// Same shape as the request workflow: mediators are read-only, same-id
/// double submission is guarded by the processing marker, and every
/// successful mutation refetches the queue from the backend. There is no
/// status precondition — the backend only ever lists unresolved signups,
/// so presence in the snapshot is the precondition.
#[derive(Debug)]
pub struct PendingUserQueue {
    api: Arc<dyn BackendApi>,
    role: Role,
    users: RwLock<Vec<PendingUser>>,
    processing: ProcessingSlot<UserId>,
}

impl PendingUserQueue {
    /// Create a queue for the session role, initially empty.
    pub fn new(api: Arc<dyn BackendApi>, role: Role) -> Self {
        Self {
            api,
            role,
            users: RwLock::new(Vec::new()),
            processing: ProcessingSlot::new(),
        }
    }

    /// The id currently being mutated, if any.
    pub fn processing_id(&self) -> Option<UserId> {
        self.processing.current()
    }

    /// Refetch the queue from the backend.
    pub async fn refresh(&self) -> AppResult<()> {
        let users = self.api.list_pending_users().await?;
        *self.users.write().expect("queue state poisoned") = users;
        Ok(())
    }

    /// The fetched queue.
    pub fn snapshot(&self) -> Vec<PendingUser> {
        self.users.read().expect("queue state poisoned").clone()
    }

    /// Approve a signup, activating the account, then refetch.
    pub async fn approve(&self, id: &UserId) -> AppResult<()> {
        self.ensure_can_mutate()?;
        self.ensure_listed(id)?;

        let _guard = self.processing.begin(id)?;
        self.api.approve_user(id).await?;
        info!(%id, "Pending user approved");
        self.refresh().await
    }

    /// Reject a signup, removing the record, then refetch. User rejection
    /// carries no reason payload.
    pub async fn reject(&self, id: &UserId) -> AppResult<()> {
        self.ensure_can_mutate()?;
        self.ensure_listed(id)?;

        let _guard = self.processing.begin(id)?;
        self.api.reject_user(id).await?;
        info!(%id, "Pending user rejected");
        self.refresh().await
    }

    fn ensure_can_mutate(&self) -> AppResult<()> {
        if self.role.is_mediator() {
            return Err(AppError::authorization(
                "Mediators have read-only access to pending approvals",
            ));
        }
        Ok(())
    }

    fn ensure_listed(&self, id: &UserId) -> AppResult<()> {
        let users = self.users.read().expect("queue state poisoned");
        if !users.iter().any(|user| &user.id == id) {
            return Err(AppError::not_found(format!(
                "No pending user {id} in the current queue"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use invex_client::MockBackend;
    use invex_core::error::ErrorKind;

    use super::*;

    fn seed_user(mock: &MockBackend) -> UserId {
        let id = UserId::new(Uuid::new_v4().to_string());
        mock.seed_pending_user(PendingUser {
            id: id.clone(),
            name: "New Client".to_string(),
            email: "new@invex.test".to_string(),
            requested_role: Some(Role::Client),
            created_at: Utc::now(),
        });
        id
    }

    fn queue(role: Role) -> (PendingUserQueue, Arc<MockBackend>) {
        let mock = Arc::new(MockBackend::new());
        let api: Arc<dyn BackendApi> = Arc::clone(&mock) as Arc<dyn BackendApi>;
        (PendingUserQueue::new(api, role), mock)
    }

    #[tokio::test]
    async fn test_approve_removes_the_signup_via_refetch() {
        let (queue, mock) = queue(Role::Admin);
        let id = seed_user(&mock);
        queue.refresh().await.unwrap();
        assert_eq!(queue.snapshot().len(), 1);

        queue.approve(&id).await.unwrap();
        assert!(queue.snapshot().is_empty());
        assert_eq!(mock.approve_user_calls(), 1);
        assert_eq!(queue.processing_id(), None);
    }

    #[tokio::test]
    async fn test_mediator_is_read_only() {
        let (queue, mock) = queue(Role::Mediator);
        let id = seed_user(&mock);
        queue.refresh().await.unwrap();

        assert_eq!(
            queue.approve(&id).await.unwrap_err().kind,
            ErrorKind::Authorization
        );
        assert_eq!(
            queue.reject(&id).await.unwrap_err().kind,
            ErrorKind::Authorization
        );
        assert_eq!(mock.approve_user_calls(), 0);
        assert_eq!(mock.reject_user_calls(), 0);
    }

    #[tokio::test]
    async fn test_rejecting_an_unlisted_user_is_not_found() {
        let (queue, _mock) = queue(Role::Admin);
        queue.refresh().await.unwrap();
        let err = queue.reject(&UserId::from("ghost")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_remote_failure_clears_the_marker() {
        let (queue, mock) = queue(Role::Admin);
        let id = seed_user(&mock);
        queue.refresh().await.unwrap();

        mock.fail_next_mutation("Account already active");
        let err = queue.approve(&id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Remote);
        assert_eq!(err.message, "Account already active");
        assert_eq!(queue.processing_id(), None);
    }
}
