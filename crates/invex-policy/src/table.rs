//! Route-to-role authorization table.

use std::collections::{HashMap, HashSet};

use invex_entity::user::Role;

use crate::route::Route;

/// Maps each restricted route to its allowed roles and each role to its
/// default landing route.
///
/// A route absent from the table carries no restriction; the guard still
/// requires authentication for everything except the login screen.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    entries: HashMap<Route, HashSet<Role>>,
}

impl AccessPolicy {
    /// Build the console's policy table.
    pub fn new() -> Self {
        let mut entries = HashMap::new();

        entries.insert(Route::ClientDashboard, HashSet::from([Role::Client]));
        entries.insert(
            Route::AdminClients,
            HashSet::from([Role::Admin, Role::Mediator]),
        );
        entries.insert(
            Route::CreateUser,
            HashSet::from([Role::Admin, Role::Mediator]),
        );
        entries.insert(
            Route::PendingUsers,
            HashSet::from([Role::Admin, Role::Mediator]),
        );
        entries.insert(Route::TransactionApprovals, HashSet::from([Role::Admin]));

        Self { entries }
    }

    /// The allowed roles for a route, if it is restricted.
    pub fn allowed_roles(&self, route: &Route) -> Option<&HashSet<Role>> {
        self.entries.get(route)
    }

    /// Where a denied (or freshly logged-in) session of this role lands.
    ///
    /// Mediators share the admin client overview; a session without a
    /// recognizable role is invalid and lands back on login.
    pub fn landing_route(role: Option<Role>) -> Route {
        match role {
            Some(Role::Admin) | Some(Role::Mediator) => Route::AdminClients,
            Some(Role::Client) => Route::ClientDashboard,
            None => Route::Login,
        }
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_approvals_is_admin_only() {
        let policy = AccessPolicy::new();
        let roles = policy.allowed_roles(&Route::TransactionApprovals).unwrap();
        assert!(roles.contains(&Role::Admin));
        assert!(!roles.contains(&Role::Mediator));
        assert!(!roles.contains(&Role::Client));
    }

    #[test]
    fn test_mediators_share_the_admin_overview() {
        assert_eq!(
            AccessPolicy::landing_route(Some(Role::Mediator)),
            Route::AdminClients
        );
        assert_eq!(
            AccessPolicy::landing_route(Some(Role::Admin)),
            Route::AdminClients
        );
        assert_eq!(
            AccessPolicy::landing_route(Some(Role::Client)),
            Route::ClientDashboard
        );
        assert_eq!(AccessPolicy::landing_route(None), Route::Login);
    }

    #[test]
    fn test_login_is_unrestricted() {
        let policy = AccessPolicy::new();
        assert!(policy.allowed_roles(&Route::Login).is_none());
    }
}
