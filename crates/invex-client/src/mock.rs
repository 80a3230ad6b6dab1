//! In-memory fake backend for tests and offline demos.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use invex_core::types::{RequestId, UserId};
use invex_core::{AppError, AppResult};
use invex_entity::request::{FinancialRequest, RequestKind, RequestStatus};
use invex_entity::session::TokenPair;
use invex_entity::user::PendingUser;

use crate::api::BackendApi;

/// The reject call a test most recently drove into the mock.
#[derive(Debug, Clone)]
pub struct RecordedRejection {
    /// Which collection the rejection targeted.
    pub kind: RequestKind,
    /// The rejected request.
    pub id: RequestId,
    /// The reason exactly as transmitted; `None` when no reason field was
    /// sent at all.
    pub reason: Option<String>,
}

/// An in-memory [`BackendApi`] with seedable state, injectable failures,
/// optional latency, and per-operation call counters.
#[derive(Debug, Default)]
pub struct MockBackend {
    tokens: Mutex<Option<TokenPair>>,
    requests: DashMap<RequestKind, Vec<FinancialRequest>>,
    pending_users: Mutex<Vec<PendingUser>>,
    latency: Mutex<Option<Duration>>,
    fail_next_mutation: Mutex<Option<String>>,
    last_rejection: Mutex<Option<RecordedRejection>>,
    list_calls: AtomicUsize,
    approve_request_calls: AtomicUsize,
    reject_request_calls: AtomicUsize,
    approve_user_calls: AtomicUsize,
    reject_user_calls: AtomicUsize,
}

impl MockBackend {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the token pair returned by the next logins.
    pub fn issue_tokens(&self, tokens: TokenPair) {
        *self.tokens.lock().expect("mock lock poisoned") = Some(tokens);
    }

    /// Seed a full request record.
    pub fn seed_request(&self, kind: RequestKind, request: FinancialRequest) {
        self.requests.entry(kind).or_default().push(request);
    }

    /// Seed a minimal pending request and return its generated id.
    pub fn seed_pending(&self, kind: RequestKind, amount: f64) -> RequestId {
        let id = RequestId::new(Uuid::new_v4().to_string());
        self.seed_request(
            kind,
            FinancialRequest {
                id: id.clone(),
                user_id: UserId::new(Uuid::new_v4().to_string()),
                user_name: "Test Client".to_string(),
                email: Some("client@invex.test".to_string()),
                amount,
                note: None,
                status: RequestStatus::Pending,
                created_at: Utc::now(),
                processed_at: None,
            },
        );
        id
    }

    /// Seed a pending signup.
    pub fn seed_pending_user(&self, user: PendingUser) {
        self.pending_users.lock().expect("mock lock poisoned").push(user);
    }

    /// Delay every subsequent mutating call by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().expect("mock lock poisoned") = Some(latency);
    }

    /// Make the next mutating call fail with the given backend message.
    pub fn fail_next_mutation(&self, message: impl Into<String>) {
        *self.fail_next_mutation.lock().expect("mock lock poisoned") = Some(message.into());
    }

    /// The most recent rejection driven into the mock.
    pub fn last_rejection(&self) -> Option<RecordedRejection> {
        self.last_rejection.lock().expect("mock lock poisoned").clone()
    }

    /// How many list fetches have been issued.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// How many request approvals have reached the backend.
    pub fn approve_request_calls(&self) -> usize {
        self.approve_request_calls.load(Ordering::SeqCst)
    }

    /// How many request rejections have reached the backend.
    pub fn reject_request_calls(&self) -> usize {
        self.reject_request_calls.load(Ordering::SeqCst)
    }

    /// How many signup approvals have reached the backend.
    pub fn approve_user_calls(&self) -> usize {
        self.approve_user_calls.load(Ordering::SeqCst)
    }

    /// How many signup rejections have reached the backend.
    pub fn reject_user_calls(&self) -> usize {
        self.reject_user_calls.load(Ordering::SeqCst)
    }

    async fn maybe_delay(&self) {
        let latency = *self.latency.lock().expect("mock lock poisoned");
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn take_injected_failure(&self) -> Option<AppError> {
        self.fail_next_mutation
            .lock()
            .expect("mock lock poisoned")
            .take()
            .map(AppError::remote)
    }

    fn transition(
        &self,
        kind: RequestKind,
        id: &RequestId,
        next: RequestStatus,
    ) -> AppResult<()> {
        let mut list = self.requests.entry(kind).or_default();
        let Some(request) = list.iter_mut().find(|r| &r.id == id) else {
            return Err(AppError::remote(format!(
                "{} request {id} not found",
                kind.as_word()
            )));
        };
        if !request.status.can_transition_to(next) {
            return Err(AppError::remote(format!(
                "Request {id} has already been processed"
            )));
        }
        request.status = next;
        request.processed_at = Some(Utc::now());
        Ok(())
    }
}

#[async_trait]
impl BackendApi for MockBackend {
    async fn login(&self, _identifier: &str, _secret: &str) -> AppResult<TokenPair> {
        match self.tokens.lock().expect("mock lock poisoned").clone() {
            Some(tokens) => Ok(tokens),
            None => Err(AppError::remote("Invalid credentials")),
        }
    }

    async fn logout(&self) -> AppResult<()> {
        Ok(())
    }

    async fn list_pending_users(&self) -> AppResult<Vec<PendingUser>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.pending_users.lock().expect("mock lock poisoned").clone())
    }

    async fn approve_user(&self, id: &UserId) -> AppResult<()> {
        self.approve_user_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_delay().await;
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        let mut users = self.pending_users.lock().expect("mock lock poisoned");
        match users.iter().position(|u| &u.id == id) {
            Some(index) => {
                users.remove(index);
                Ok(())
            }
            None => Err(AppError::remote(format!("Pending user {id} not found"))),
        }
    }

    async fn reject_user(&self, id: &UserId) -> AppResult<()> {
        self.reject_user_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_delay().await;
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        let mut users = self.pending_users.lock().expect("mock lock poisoned");
        match users.iter().position(|u| &u.id == id) {
            Some(index) => {
                users.remove(index);
                Ok(())
            }
            None => Err(AppError::remote(format!("Pending user {id} not found"))),
        }
    }

    async fn list_requests(&self, kind: RequestKind) -> AppResult<Vec<FinancialRequest>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .requests
            .get(&kind)
            .map(|list| list.clone())
            .unwrap_or_default())
    }

    async fn approve_request(&self, kind: RequestKind, id: &RequestId) -> AppResult<()> {
        self.approve_request_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_delay().await;
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        self.transition(kind, id, RequestStatus::Approved)
    }

    async fn reject_request(
        &self,
        kind: RequestKind,
        id: &RequestId,
        reason: Option<&str>,
    ) -> AppResult<()> {
        self.reject_request_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_delay().await;
        *self.last_rejection.lock().expect("mock lock poisoned") = Some(RecordedRejection {
            kind,
            id: id.clone(),
            reason: reason.map(String::from),
        });
        if let Some(err) = self.take_injected_failure() {
            return Err(err);
        }
        self.transition(kind, id, RequestStatus::Rejected)
    }
}
