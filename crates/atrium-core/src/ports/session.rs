//! Session store port.

use crate::domain::token::SessionToken;

/// Failure writing the session to its backing store.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session persistence failed: {0}")]
    Persistence(String),
}

/// Single source of truth for the current session credential.
///
/// Injected wherever auth state is needed rather than living in a global;
/// implementations must be safe to share across worker threads. Mutations
/// are synchronous and last-write-wins.
pub trait SessionStore: Send + Sync {
    /// Current token; [`SessionToken::empty`] when no session is active.
    fn get(&self) -> SessionToken;

    /// Replace the current token. No format validation, opaque passthrough.
    fn set(&self, token: SessionToken) -> Result<(), SessionError>;

    /// Drop the current session. Idempotent.
    fn clear(&self) -> Result<(), SessionError>;
}
