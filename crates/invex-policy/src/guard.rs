//! Allow-or-redirect decisions for guarded navigation.

use std::collections::HashSet;

use tracing::warn;

use invex_auth::SessionOracle;
use invex_core::AppResult;
use invex_entity::user::Role;

use crate::route::Route;
use crate::table::AccessPolicy;

/// The outcome of a navigation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// The guarded content may render.
    Allow,
    /// Navigation must divert to `target`.
    Redirect {
        /// Where to send the caller instead.
        target: Route,
        /// The originally requested path, carried through opaquely so the
        /// view layer can return there after login. Only set when the
        /// redirect is caused by a missing session.
        preserved: Option<String>,
    },
}

impl RouteDecision {
    fn redirect(target: Route) -> Self {
        Self::Redirect {
            target,
            preserved: None,
        }
    }

    fn redirect_preserving(target: Route, from: &Route) -> Self {
        Self::Redirect {
            target,
            preserved: Some(from.path().to_string()),
        }
    }
}

/// Evaluates the access policy against the live session.
///
/// Pure decision logic over what the oracle exposes: no I/O of its own and
/// no caching — every navigation re-runs the check because authentication
/// state can change between navigations (a logout in another tab, an
/// expired credential).
#[derive(Debug, Clone)]
pub struct RouteGuard {
    oracle: SessionOracle,
    policy: AccessPolicy,
}

impl RouteGuard {
    /// Create a guard over the given oracle with the standard policy table.
    pub fn new(oracle: SessionOracle) -> Self {
        Self {
            oracle,
            policy: AccessPolicy::new(),
        }
    }

    /// Decide whether `route` may render for the current session.
    pub async fn resolve(&self, route: &Route) -> AppResult<RouteDecision> {
        match route {
            // Login is public; the root and anything off the table bounce
            // to login unconditionally.
            Route::Login => Ok(RouteDecision::Allow),
            Route::Root | Route::Unknown(_) => Ok(RouteDecision::redirect(Route::Login)),
            _ => {
                let required = self.policy.allowed_roles(route).cloned().unwrap_or_default();
                self.resolve_with(route, &required).await
            }
        }
    }

    /// Decide against an explicit role set instead of the table entry.
    ///
    /// An empty `required` set means "any authenticated session".
    pub async fn resolve_with(
        &self,
        route: &Route,
        required: &HashSet<Role>,
    ) -> AppResult<RouteDecision> {
        if !self.oracle.is_authenticated().await? {
            return Ok(RouteDecision::redirect_preserving(Route::Login, route));
        }

        if required.is_empty() {
            return Ok(RouteDecision::Allow);
        }

        let role = self.oracle.current_role().await?;
        match role {
            Some(role) if required.contains(&role) => Ok(RouteDecision::Allow),
            Some(role) => {
                warn!(route = %route, %role, "Access denied; redirecting to landing route");
                Ok(RouteDecision::redirect(AccessPolicy::landing_route(Some(
                    role,
                ))))
            }
            // Authenticated but no recognizable role: an invalid session,
            // never silently allowed.
            None => Ok(RouteDecision::redirect(Route::Login)),
        }
    }
}
