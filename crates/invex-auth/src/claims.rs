//! Claims payload embedded in the session credential.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use invex_entity::user::Role;

/// Claims carried by the middle segment of the session credential.
///
/// Historical tokens carry the role list under either `rol` or `roles`;
/// both shapes are accepted and [`SessionClaims::primary_role_claim`]
/// resolves them in that order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject — the account identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Role list, current claim shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rol: Option<Vec<String>>,
    /// Role list, legacy claim shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    /// Expiration timestamp (seconds since epoch), when the issuer sets one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl SessionClaims {
    /// The raw authoritative role claim.
    ///
    /// Sessions are single-role: only the first element of the list is ever
    /// consulted, from `rol` when present and from `roles` otherwise.
    pub fn primary_role_claim(&self) -> Option<&str> {
        self.rol
            .as_deref()
            .or(self.roles.as_deref())
            .and_then(|list| list.first())
            .map(String::as_str)
    }

    /// The authoritative role, normalized across alias forms.
    pub fn role(&self) -> Option<Role> {
        self.primary_role_claim().and_then(Role::from_claim)
    }

    /// Whether the credential has expired as of `now`.
    ///
    /// A credential without an `exp` claim never expires locally.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.exp {
            Some(exp) => exp < now.timestamp(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rol_takes_precedence_over_roles() {
        let claims = SessionClaims {
            rol: Some(vec!["ROLE_ADMIN".into(), "ROLE_CLIENT".into()]),
            roles: Some(vec!["ROLE_MEDIATOR".into()]),
            ..Default::default()
        };
        assert_eq!(claims.role(), Some(Role::Admin));
    }

    #[test]
    fn test_roles_fallback() {
        let claims = SessionClaims {
            roles: Some(vec!["CLIENT".into()]),
            ..Default::default()
        };
        assert_eq!(claims.primary_role_claim(), Some("CLIENT"));
        assert_eq!(claims.role(), Some(Role::Client));
    }

    #[test]
    fn test_empty_role_lists_yield_none() {
        let claims = SessionClaims {
            rol: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(claims.role(), None);
    }

    #[test]
    fn test_expiry_math() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let expired = SessionClaims {
            exp: Some(1_699_999_999),
            ..Default::default()
        };
        let live = SessionClaims {
            exp: Some(1_700_000_001),
            ..Default::default()
        };
        let eternal = SessionClaims::default();
        assert!(expired.is_expired_at(now));
        assert!(!live.is_expired_at(now));
        assert!(!eternal.is_expired_at(now));
    }
}
