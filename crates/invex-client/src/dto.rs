//! Wire shapes for the HTTP backend.

use serde::{Deserialize, Serialize};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginBody {
    /// Account identifier (email).
    pub email: String,
    /// Account secret.
    pub password: String,
}

/// Rejection body carried only by withdrawal rejections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectBody {
    /// Human-readable rejection reason.
    pub reason: String,
}
