//! Production HTTP implementation of [`BackendApi`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::{debug, warn};

use invex_core::config::api::ApiConfig;
use invex_core::traits::CredentialStore;
use invex_core::types::{RemoteErrorBody, RequestId, UserId};
use invex_core::{AppError, AppResult};
use invex_entity::request::{FinancialRequest, RequestKind};
use invex_entity::session::TokenPair;
use invex_entity::user::PendingUser;

use crate::api::BackendApi;
use crate::dto::{LoginBody, RejectBody};

/// HTTP client for the backend service.
///
/// Reads the credential store before every call and attaches the session
/// credential as a bearer token when one is present, mirroring the
/// interceptor the web console uses.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackend")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpBackend {
    /// Build a backend client from configuration.
    pub fn new(config: &ApiConfig, store: Arc<dyn CredentialStore>) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Attach the stored session credential, when present.
    async fn authorized(&self, builder: RequestBuilder) -> AppResult<RequestBuilder> {
        match self.store.access_token().await? {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => Ok(builder),
        }
    }

    async fn send(&self, builder: RequestBuilder, context: &str) -> AppResult<Response> {
        let response = builder.send().await.map_err(|e| {
            AppError::with_source(
                invex_core::error::ErrorKind::Remote,
                format!("{context}: backend unreachable"),
                e,
            )
        })?;
        Self::check(response, context).await
    }

    /// Map a non-success response to a remote failure, preferring the
    /// backend's own message over generic phrasing.
    async fn check(response: Response, context: &str) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.json::<RemoteErrorBody>().await.unwrap_or_default();
        let message = match body.display_message() {
            Some(message) => message.to_string(),
            None => format!("{context} failed ({status})"),
        };
        debug!(%status, context, "Backend call failed");
        Err(AppError::remote(message))
    }

    fn kind_base(kind: RequestKind) -> &'static str {
        match kind {
            RequestKind::Deposit => "/admin/deposit-requests",
            RequestKind::Withdrawal => "/admin/withdrawal-requests",
        }
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn login(&self, identifier: &str, secret: &str) -> AppResult<TokenPair> {
        let body = LoginBody {
            email: identifier.to_string(),
            password: secret.to_string(),
        };
        let response = self
            .send(self.client.post(self.url("/auth/login")).json(&body), "Login")
            .await?;
        response
            .json::<TokenPair>()
            .await
            .map_err(|e| AppError::remote(format!("Login response was malformed: {e}")))
    }

    async fn logout(&self) -> AppResult<()> {
        // Best-effort only: the session is cleared locally regardless, so a
        // failed or missing logout endpoint is logged and swallowed.
        let builder = self.authorized(self.client.post(self.url("/auth/logout"))).await?;
        match builder.send().await {
            Ok(response) if response.status() == StatusCode::NOT_FOUND => Ok(()),
            Ok(_) => Ok(()),
            Err(e) => {
                warn!("Logout announcement failed: {e}");
                Ok(())
            }
        }
    }

    async fn list_pending_users(&self) -> AppResult<Vec<PendingUser>> {
        let builder = self
            .authorized(self.client.get(self.url("/admin/pending-users")))
            .await?;
        let response = self.send(builder, "Listing pending users").await?;
        response
            .json()
            .await
            .map_err(|e| AppError::remote(format!("Pending user list was malformed: {e}")))
    }

    async fn approve_user(&self, id: &UserId) -> AppResult<()> {
        let url = self.url(&format!("/admin/users/{id}/approve"));
        let builder = self.authorized(self.client.post(url)).await?;
        self.send(builder, "Approving user").await?;
        Ok(())
    }

    async fn reject_user(&self, id: &UserId) -> AppResult<()> {
        let url = self.url(&format!("/admin/users/{id}/reject"));
        let builder = self.authorized(self.client.post(url)).await?;
        self.send(builder, "Rejecting user").await?;
        Ok(())
    }

    async fn list_requests(&self, kind: RequestKind) -> AppResult<Vec<FinancialRequest>> {
        let builder = self
            .authorized(self.client.get(self.url(Self::kind_base(kind))))
            .await?;
        let context = match kind {
            RequestKind::Deposit => "Listing deposit requests",
            RequestKind::Withdrawal => "Listing withdrawal requests",
        };
        let response = self.send(builder, context).await?;
        response
            .json()
            .await
            .map_err(|e| AppError::remote(format!("Request list was malformed: {e}")))
    }

    async fn approve_request(&self, kind: RequestKind, id: &RequestId) -> AppResult<()> {
        let url = self.url(&format!("{}/{id}/approve", Self::kind_base(kind)));
        let builder = self
            .authorized(self.client.post(url).json(&serde_json::json!({})))
            .await?;
        self.send(builder, "Approving request").await?;
        Ok(())
    }

    async fn reject_request(
        &self,
        kind: RequestKind,
        id: &RequestId,
        reason: Option<&str>,
    ) -> AppResult<()> {
        let url = self.url(&format!("{}/{id}/reject", Self::kind_base(kind)));
        let mut builder = self.client.post(url);
        // Deposits reject with an empty body; withdrawals always carry the
        // resolved reason.
        if let Some(reason) = reason {
            builder = builder.json(&RejectBody {
                reason: reason.to_string(),
            });
        }
        let builder = self.authorized(builder).await?;
        self.send(builder, "Rejecting request").await?;
        Ok(())
    }
}
