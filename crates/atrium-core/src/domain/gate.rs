//! Route-level access control decision.

use crate::domain::routes::{RouteClass, RouteTable};
use crate::domain::token::SessionToken;

/// Outcome of gating a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateVerdict {
    /// Let the request through unmodified.
    Allow,
    /// Protected path without a session: send to the login landing.
    ToLogin,
    /// Auth-only path with a session already active: send to the dashboard.
    ToDashboard,
}

/// Pure decision function over a route table.
///
/// Runs once per navigation, before any handler, and reads nothing but the
/// requested path and the token extracted from the request cookie. Token
/// "presence" is a non-empty value; validity is the backend's problem.
#[derive(Debug, Clone)]
pub struct AuthGate {
    table: RouteTable,
    login_path: String,
    dashboard_path: String,
}

impl AuthGate {
    pub fn new(table: RouteTable) -> Self {
        Self {
            table,
            login_path: "/".into(),
            dashboard_path: "/dashboard".into(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn dashboard_path(&self) -> &str {
        &self.dashboard_path
    }

    pub fn decide(&self, path: &str, token: &SessionToken) -> GateVerdict {
        match self.table.classify(path) {
            RouteClass::Protected if !token.is_present() => GateVerdict::ToLogin,
            RouteClass::AuthOnly if token.is_present() => GateVerdict::ToDashboard,
            _ => GateVerdict::Allow,
        }
    }

    /// Redirect target for a non-allow verdict.
    pub fn redirect_target(&self, verdict: GateVerdict) -> Option<&str> {
        match verdict {
            GateVerdict::Allow => None,
            GateVerdict::ToLogin => Some(&self.login_path),
            GateVerdict::ToDashboard => Some(&self.dashboard_path),
        }
    }
}

impl Default for AuthGate {
    fn default() -> Self {
        Self::new(RouteTable::default())
    }
}
