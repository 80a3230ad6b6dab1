//! Token pair issued by the backend at login.

use serde::{Deserialize, Serialize};

/// The credentials returned by a successful login.
///
/// The refresh token is optional; when absent only the primary slot of the
/// credential store is populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// The opaque signed session credential.
    pub access_token: String,
    /// The refresh companion, when the backend issues one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}
