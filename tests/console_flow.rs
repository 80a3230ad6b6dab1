//! End-to-end console flows: login, guarded navigation, and the approval
//! lifecycle, all driven against the in-memory mock backend.

use std::sync::Arc;

use invex_auth::SessionOracle;
use invex_auth::store::MemoryCredentialStore;
use invex_client::{BackendApi, MockBackend};
use invex_core::error::ErrorKind;
use invex_core::traits::CredentialStore;
use invex_entity::request::{RequestKind, RequestStatus, StatusFilter};
use invex_entity::session::TokenPair;
use invex_entity::user::{PendingUser, Role};
use invex_policy::{Route, RouteDecision, RouteGuard};
use invex_workflow::{ApprovalWorkflow, PendingUserQueue};

fn mint(claims: &serde_json::Value) -> String {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        claims,
        &jsonwebtoken::EncodingKey::from_secret(b"test-secret"),
    )
    .expect("minting a test credential cannot fail")
}

struct Console {
    mock: Arc<MockBackend>,
    api: Arc<dyn BackendApi>,
    store: Arc<dyn CredentialStore>,
    oracle: SessionOracle,
    guard: RouteGuard,
}

fn console() -> Console {
    let mock = Arc::new(MockBackend::new());
    let api: Arc<dyn BackendApi> = Arc::clone(&mock) as Arc<dyn BackendApi>;
    let store: Arc<dyn CredentialStore> = Arc::new(MemoryCredentialStore::new());
    let oracle = SessionOracle::new(Arc::clone(&store));
    let guard = RouteGuard::new(oracle.clone());
    Console {
        mock,
        api,
        store,
        oracle,
        guard,
    }
}

#[tokio::test]
async fn test_admin_drives_a_withdrawal_approval_end_to_end() {
    let console = console();
    let id = console.mock.seed_pending(RequestKind::Withdrawal, 12_500.0);
    console.mock.issue_tokens(TokenPair {
        access_token: mint(&serde_json::json!({
            "sub": "ops@invex.test",
            "rol": ["ROLE_ADMIN"],
        })),
        refresh_token: Some("refresh".to_string()),
    });

    // Before login every guarded screen bounces to login, preserving the
    // requested location.
    let decision = console
        .guard
        .resolve(&Route::TransactionApprovals)
        .await
        .unwrap();
    assert_eq!(
        decision,
        RouteDecision::Redirect {
            target: Route::Login,
            preserved: Some("/admin/transaction-approvals".to_string()),
        }
    );

    // Login persists both slots and opens the admin-only screen.
    let tokens = console.api.login("ops@invex.test", "secret").await.unwrap();
    console.oracle.establish(&tokens).await.unwrap();
    assert_eq!(
        console
            .guard
            .resolve(&Route::TransactionApprovals)
            .await
            .unwrap(),
        RouteDecision::Allow
    );

    // Approve and observe the refetched state, not a local patch.
    let role = console.oracle.current_role().await.unwrap().unwrap();
    assert_eq!(role, Role::Admin);
    let engine = ApprovalWorkflow::new(
        Arc::clone(&console.api),
        role,
        RequestKind::Withdrawal,
    );
    engine.refresh().await.unwrap();
    engine.approve(&id).await.unwrap();

    engine.set_filter(StatusFilter::Approved);
    let visible = engine.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, id);
    assert_eq!(visible[0].status, RequestStatus::Approved);

    // Logout clears both slots; navigation bounces again.
    console.api.logout().await.unwrap();
    console.oracle.clear().await.unwrap();
    assert_eq!(console.store.access_token().await.unwrap(), None);
    assert_eq!(console.store.refresh_token().await.unwrap(), None);
    assert!(matches!(
        console
            .guard
            .resolve(&Route::TransactionApprovals)
            .await
            .unwrap(),
        RouteDecision::Redirect { .. }
    ));
}

#[tokio::test]
async fn test_expired_session_is_purged_during_navigation() {
    let console = console();
    let expired = mint(&serde_json::json!({ "rol": ["ROLE_ADMIN"], "exp": 1 }));
    console.store.store(&expired, Some("refresh")).await.unwrap();

    let decision = console.guard.resolve(&Route::AdminClients).await.unwrap();
    assert_eq!(
        decision,
        RouteDecision::Redirect {
            target: Route::Login,
            preserved: Some("/admin/clients".to_string()),
        }
    );

    // The purge removed both slots as a side effect of the check.
    assert_eq!(console.store.access_token().await.unwrap(), None);
    assert_eq!(console.store.refresh_token().await.unwrap(), None);
}

#[tokio::test]
async fn test_mediator_views_share_the_admin_overview_but_stay_read_only() {
    let console = console();
    console.mock.seed_pending_user(PendingUser {
        id: "signup-1".into(),
        name: "New Client".to_string(),
        email: "new@invex.test".to_string(),
        requested_role: Some(Role::Client),
        created_at: chrono::Utc::now(),
    });
    let token = mint(&serde_json::json!({ "roles": ["MEDIATOR"] }));
    console.store.store(&token, None).await.unwrap();

    // Shared screens are reachable...
    assert_eq!(
        console.guard.resolve(&Route::PendingUsers).await.unwrap(),
        RouteDecision::Allow
    );
    // ...the admin-only screen diverts to the shared overview.
    assert_eq!(
        console
            .guard
            .resolve(&Route::TransactionApprovals)
            .await
            .unwrap(),
        RouteDecision::Redirect {
            target: Route::AdminClients,
            preserved: None,
        }
    );

    // Viewing the queue works; mutating it does not.
    let role = console.oracle.current_role().await.unwrap().unwrap();
    let queue = PendingUserQueue::new(Arc::clone(&console.api), role);
    queue.refresh().await.unwrap();
    let snapshot = queue.snapshot();
    assert_eq!(snapshot.len(), 1);

    let err = queue.approve(&snapshot[0].id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert_eq!(console.mock.approve_user_calls(), 0);
}
