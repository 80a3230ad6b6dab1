//! Pending signup awaiting administrative disposition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use invex_core::types::UserId;

use super::Role;

/// A signup record waiting for an administrator to approve or reject it.
///
/// Approval activates the account; rejection removes the record. The
/// lifecycle lives entirely on the backend — the console only lists the
/// queue and issues the disposition calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingUser {
    /// Opaque identifier assigned by the backend.
    pub id: UserId,
    /// Display name supplied at signup.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Role the signup requested, if the backend exposes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_role: Option<Role>,
    /// When the signup was submitted.
    pub created_at: DateTime<Utc>,
}
