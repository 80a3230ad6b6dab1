//! Request kind enumeration and the kind-dependent rejection contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder submitted when a withdrawal is rejected without a reason.
pub const NO_REASON_PLACEHOLDER: &str = "No reason provided";

/// The two parallel kinds of financial request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestKind {
    /// A client paying money in.
    Deposit,
    /// A client taking money out.
    Withdrawal,
}

impl RequestKind {
    /// Resolve the rejection reason to transmit for this kind.
    ///
    /// The two kinds have asymmetric backend contracts: withdrawals always
    /// carry a reason (a blank one is coerced to
    /// [`NO_REASON_PLACEHOLDER`]), deposits never carry one. The asymmetry
    /// mirrors the backend and must not be unified here.
    pub fn reject_reason(&self, raw: Option<&str>) -> Option<String> {
        match self {
            Self::Deposit => None,
            Self::Withdrawal => {
                let trimmed = raw.map(str::trim).unwrap_or_default();
                if trimmed.is_empty() {
                    Some(NO_REASON_PLACEHOLDER.to_string())
                } else {
                    Some(trimmed.to_string())
                }
            }
        }
    }

    /// Return the kind as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "DEPOSIT",
            Self::Withdrawal => "WITHDRAWAL",
        }
    }

    /// Return the kind as a lowercase word for messages and URLs.
    pub fn as_word(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_withdrawal_reason_coercion() {
        let kind = RequestKind::Withdrawal;
        assert_eq!(kind.reject_reason(None).as_deref(), Some(NO_REASON_PLACEHOLDER));
        assert_eq!(kind.reject_reason(Some("")).as_deref(), Some(NO_REASON_PLACEHOLDER));
        assert_eq!(kind.reject_reason(Some("   ")).as_deref(), Some(NO_REASON_PLACEHOLDER));
        assert_eq!(kind.reject_reason(Some("flagged")).as_deref(), Some("flagged"));
    }

    #[test]
    fn test_deposit_never_carries_a_reason() {
        let kind = RequestKind::Deposit;
        assert_eq!(kind.reject_reason(None), None);
        assert_eq!(kind.reject_reason(Some("flagged")), None);
    }
}
