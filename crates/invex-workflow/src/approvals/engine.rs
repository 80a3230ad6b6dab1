//! The approval workflow engine.

use std::sync::{Arc, RwLock};

use tracing::info;

use invex_client::BackendApi;
use invex_core::types::RequestId;
use invex_core::{AppError, AppResult};
use invex_entity::request::{FinancialRequest, RequestKind, RequestStatus, StatusFilter};
use invex_entity::user::Role;

use crate::processing::ProcessingSlot;

/// View state the engine re-renders from.
#[derive(Debug, Clone)]
struct ViewState {
    kind: RequestKind,
    filter: StatusFilter,
    requests: Vec<FinancialRequest>,
}

/// Drives the lifecycle of deposit and withdrawal requests.
///
/// The engine holds the last fetched list for the active kind and applies
/// the status filter client-side, so every filtered view is consistent
/// with one underlying fetch. Mutations enforce the mediator read-only
/// rule and the PENDING precondition before any remote call, and every
/// successful mutation triggers a full refetch rather than patching the
/// cached list.
#[derive(Debug)]
pub struct ApprovalWorkflow {
    api: Arc<dyn BackendApi>,
    role: Role,
    state: RwLock<ViewState>,
    processing: ProcessingSlot<RequestId>,
}

impl ApprovalWorkflow {
    /// Create an engine for the session role, starting on `kind` with an
    /// empty list. Call [`ApprovalWorkflow::refresh`] to populate it.
    pub fn new(api: Arc<dyn BackendApi>, role: Role, kind: RequestKind) -> Self {
        Self {
            api,
            role,
            state: RwLock::new(ViewState {
                kind,
                filter: StatusFilter::All,
                requests: Vec::new(),
            }),
            processing: ProcessingSlot::new(),
        }
    }

    /// The active request kind.
    pub fn kind(&self) -> RequestKind {
        self.state.read().expect("workflow state poisoned").kind
    }

    /// The active display filter.
    pub fn filter(&self) -> StatusFilter {
        self.state.read().expect("workflow state poisoned").filter
    }

    /// The id currently being mutated, if any. The view layer disables
    /// that row's controls while leaving unrelated rows interactive.
    pub fn processing_id(&self) -> Option<RequestId> {
        self.processing.current()
    }

    /// Refetch the full list for the active kind from the backend.
    pub async fn refresh(&self) -> AppResult<()> {
        let kind = self.kind();
        let requests = self.api.list_requests(kind).await?;
        let mut state = self.state.write().expect("workflow state poisoned");
        state.requests = requests;
        Ok(())
    }

    /// Switch the active kind, resetting the filter and refetching.
    ///
    /// Selecting the already-active kind is a no-op; changing only the
    /// filter never refetches.
    pub async fn select_kind(&self, kind: RequestKind) -> AppResult<()> {
        {
            let mut state = self.state.write().expect("workflow state poisoned");
            if state.kind == kind {
                return Ok(());
            }
            state.kind = kind;
            state.filter = StatusFilter::All;
            state.requests.clear();
        }
        self.refresh().await
    }

    /// Change the display filter. Purely local.
    pub fn set_filter(&self, filter: StatusFilter) {
        self.state.write().expect("workflow state poisoned").filter = filter;
    }

    /// The full fetched list, unfiltered.
    pub fn snapshot(&self) -> Vec<FinancialRequest> {
        self.state
            .read()
            .expect("workflow state poisoned")
            .requests
            .clone()
    }

    /// The fetched list with the active filter applied.
    pub fn visible(&self) -> Vec<FinancialRequest> {
        let state = self.state.read().expect("workflow state poisoned");
        state
            .requests
            .iter()
            .filter(|request| state.filter.matches(request.status))
            .cloned()
            .collect()
    }

    /// Approve a pending request and refetch the authoritative list.
    pub async fn approve(&self, id: &RequestId) -> AppResult<()> {
        self.ensure_can_mutate()?;
        self.ensure_pending(id)?;
        let kind = self.kind();

        let _guard = self.processing.begin(id)?;
        self.api.approve_request(kind, id).await?;
        info!(%id, kind = kind.as_word(), "Request approved");
        self.refresh().await
    }

    /// Reject a pending request and refetch the authoritative list.
    ///
    /// The reason is resolved per the kind's contract before transmission:
    /// withdrawals always carry one (blank input becomes the placeholder),
    /// deposits never do.
    pub async fn reject(&self, id: &RequestId, reason: Option<&str>) -> AppResult<()> {
        self.ensure_can_mutate()?;
        self.ensure_pending(id)?;
        let kind = self.kind();
        let resolved = kind.reject_reason(reason);

        let _guard = self.processing.begin(id)?;
        self.api.reject_request(kind, id, resolved.as_deref()).await?;
        info!(%id, kind = kind.as_word(), "Request rejected");
        self.refresh().await
    }

    /// Mediators may view this workflow but never mutate it.
    fn ensure_can_mutate(&self) -> AppResult<()> {
        if self.role.is_mediator() {
            return Err(AppError::authorization(
                "Mediators have read-only access to approvals",
            ));
        }
        Ok(())
    }

    /// A mutation must target a request that is present and still PENDING.
    /// The view layer disables controls on resolved rows, but the engine
    /// does not assume that.
    fn ensure_pending(&self, id: &RequestId) -> AppResult<()> {
        let state = self.state.read().expect("workflow state poisoned");
        let Some(request) = state.requests.iter().find(|r| &r.id == id) else {
            return Err(AppError::not_found(format!(
                "No {} request {id} in the current list",
                state.kind.as_word()
            )));
        };
        if request.status != RequestStatus::Pending {
            return Err(AppError::precondition(format!(
                "Request {id} is already {}",
                request.status
            )));
        }
        Ok(())
    }
}
