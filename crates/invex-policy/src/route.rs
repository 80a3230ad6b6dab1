//! Client-visible route identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The navigable screens of the console.
///
/// `Unknown` preserves whatever path was requested so redirect handling can
/// report it; unknown paths are never rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// Public login screen.
    Login,
    /// The bare root path.
    Root,
    /// A client's own dashboard.
    ClientDashboard,
    /// Client overview shared by admins and mediators.
    AdminClients,
    /// User creation form.
    CreateUser,
    /// Pending signup approvals.
    PendingUsers,
    /// Deposit/withdrawal approval screen.
    TransactionApprovals,
    /// Any path outside the route table.
    Unknown(String),
}

impl Route {
    /// Parse a navigation path into a route.
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/login" => Self::Login,
            "" => Self::Root,
            "/dashboard" => Self::ClientDashboard,
            "/admin/clients" => Self::AdminClients,
            "/admin/create-user" => Self::CreateUser,
            "/admin/pending-users" => Self::PendingUsers,
            "/admin/transaction-approvals" => Self::TransactionApprovals,
            _ => Self::Unknown(path.to_string()),
        }
    }

    /// The canonical path of this route.
    pub fn path(&self) -> &str {
        match self {
            Self::Login => "/login",
            Self::Root => "/",
            Self::ClientDashboard => "/dashboard",
            Self::AdminClients => "/admin/clients",
            Self::CreateUser => "/admin/create-user",
            Self::PendingUsers => "/admin/pending-users",
            Self::TransactionApprovals => "/admin/transaction-approvals",
            Self::Unknown(path) => path,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_paths_round_trip() {
        for path in [
            "/login",
            "/dashboard",
            "/admin/clients",
            "/admin/create-user",
            "/admin/pending-users",
            "/admin/transaction-approvals",
        ] {
            let route = Route::from_path(path);
            assert_eq!(route.path(), path);
            assert!(!matches!(route, Route::Unknown(_)), "path: {path}");
        }
    }

    #[test]
    fn test_root_and_unknown() {
        assert_eq!(Route::from_path("/"), Route::Root);
        assert_eq!(
            Route::from_path("/admin/secrets"),
            Route::Unknown("/admin/secrets".to_string())
        );
    }

    #[test]
    fn test_trailing_slash_is_tolerated() {
        assert_eq!(Route::from_path("/dashboard/"), Route::ClientDashboard);
    }
}
