//! User role enumeration with claim-alias normalization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the console.
///
/// Backend-issued claims carry roles either in a short form (`ADMIN`) or a
/// prefixed form (`ROLE_ADMIN`). Both historical shapes normalize to the
/// same variant via [`Role::from_claim`]; the dual format is a
/// compatibility shim, not something callers should ever see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Full administrative access, including transaction approvals.
    Admin,
    /// An investment client; sees only their own dashboard.
    Client,
    /// An intermediary with read-only access to the admin screens.
    Mediator,
}

impl Role {
    /// Normalize a raw claim string into a role.
    ///
    /// Accepts both alias forms case-insensitively; returns `None` for
    /// anything outside the closed role set.
    pub fn from_claim(claim: &str) -> Option<Self> {
        let normalized = claim.trim().to_uppercase();
        let short = normalized.strip_prefix("ROLE_").unwrap_or(&normalized);
        match short {
            "ADMIN" => Some(Self::Admin),
            "CLIENT" => Some(Self::Client),
            "MEDIATOR" => Some(Self::Mediator),
            _ => None,
        }
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Check if this role is a mediator.
    ///
    /// Mediators may view the admin screens but never mutate approval
    /// workflows.
    pub fn is_mediator(&self) -> bool {
        matches!(self, Self::Mediator)
    }

    /// Return the role as its short uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Client => "CLIENT",
            Self::Mediator => "MEDIATOR",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = invex_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_claim(s).ok_or_else(|| {
            invex_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: ADMIN, CLIENT, MEDIATOR"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_forms_are_equivalent() {
        assert_eq!(Role::from_claim("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_claim("ROLE_ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_claim("ROLE_MEDIATOR"), Some(Role::Mediator));
        assert_eq!(Role::from_claim("client"), Some(Role::Client));
        assert_eq!(Role::from_claim(" role_client "), Some(Role::Client));
    }

    #[test]
    fn test_unknown_claims_are_rejected() {
        assert_eq!(Role::from_claim("SUPERUSER"), None);
        assert_eq!(Role::from_claim(""), None);
        assert!("ROLE_".parse::<Role>().is_err());
    }
}
