//! Client-side status filter applied over a fetched request list.

use serde::{Deserialize, Serialize};

use super::status::RequestStatus;

/// Display filter over the fetched request set.
///
/// Filtering is purely client-side: every view is computed from the same
/// underlying fetch, so changing the filter never triggers a new remote
/// call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusFilter {
    /// Show every request regardless of status.
    #[default]
    All,
    /// Only pending requests.
    Pending,
    /// Only approved requests.
    Approved,
    /// Only rejected requests.
    Rejected,
}

impl StatusFilter {
    /// Whether a request with the given status passes this filter.
    pub fn matches(&self, status: RequestStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pending => status == RequestStatus::Pending,
            Self::Approved => status == RequestStatus::Approved,
            Self::Rejected => status == RequestStatus::Rejected,
        }
    }
}
