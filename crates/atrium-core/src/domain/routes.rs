//! Static partition of console paths into access classes.

use thiserror::Error;

/// Access class of a requested path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Requires a session token.
    Protected,
    /// Forbidden while a session token is present (login, password reset).
    AuthOnly,
    /// No restriction either way.
    Open,
}

/// Error constructing a route table.
#[derive(Debug, Error)]
pub enum RouteTableError {
    #[error("path {0:?} listed as both protected and auth-only")]
    Overlap(String),
}

/// The protected / auth-only partition consulted by the auth gate.
///
/// Protected entries guard themselves and their sub-paths, so `/dashboard`
/// also covers `/dashboard/reports`. Auth-only entries match exactly;
/// treating `/` as a prefix would classify every path.
#[derive(Debug, Clone)]
pub struct RouteTable {
    protected: Vec<String>,
    auth_only: Vec<String>,
}

impl RouteTable {
    /// Build a table, rejecting paths listed in both sets.
    pub fn new(
        protected: Vec<String>,
        auth_only: Vec<String>,
    ) -> Result<Self, RouteTableError> {
        for path in &protected {
            if auth_only.contains(path) {
                return Err(RouteTableError::Overlap(path.clone()));
            }
        }
        Ok(Self {
            protected,
            auth_only,
        })
    }

    pub fn classify(&self, path: &str) -> RouteClass {
        if self.protected.iter().any(|p| {
            path.strip_prefix(p.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        }) {
            RouteClass::Protected
        } else if self.auth_only.iter().any(|p| path == p) {
            RouteClass::AuthOnly
        } else {
            RouteClass::Open
        }
    }
}

impl Default for RouteTable {
    /// The console's stock partition: the dashboard is protected, the
    /// login landing and password reset are auth-only.
    fn default() -> Self {
        Self {
            protected: vec!["/dashboard".into()],
            auth_only: vec!["/".into(), "/forgot-password".into()],
        }
    }
}
