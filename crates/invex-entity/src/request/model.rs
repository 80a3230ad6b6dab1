//! Financial request model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use invex_core::types::{RequestId, UserId};

use super::status::RequestStatus;

/// A deposit or withdrawal awaiting (or past) administrative disposition.
///
/// Deposits and withdrawals are two parallel instances of this one shape;
/// the kind is carried by the collection they were fetched from, not by the
/// record itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRequest {
    /// Opaque identifier assigned by the backend.
    pub id: RequestId,
    /// The owning user's identifier.
    pub user_id: UserId,
    /// Display name of the owning user.
    pub user_name: String,
    /// Contact email of the owning user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Requested amount; always positive.
    pub amount: f64,
    /// Free-text note attached at submission time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Current lifecycle status.
    pub status: RequestStatus,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
    /// When the request was approved or rejected; unset while pending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
}

impl FinancialRequest {
    /// Whether the request may still be mutated.
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}
