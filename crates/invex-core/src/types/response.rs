//! Remote failure payload shape.

use serde::{Deserialize, Serialize};

/// Error body the backend attaches to failed responses.
///
/// Every field is optional: the console only ever extracts a human-readable
/// message when one is present and falls back to generic phrasing otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RemoteErrorBody {
    /// Machine-readable error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Human-readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RemoteErrorBody {
    /// The displayable message, if the backend provided one.
    pub fn display_message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}
