//! In-memory session store.

use std::sync::Mutex;

use atrium_core::SessionToken;
use atrium_core::ports::{SessionError, SessionStore};

/// Mutex-guarded single-slot token store.
///
/// The gateway runs on a multi-threaded runtime, so the slot needs a lock
/// even though mutations are rare. Writes are last-write-wins; the cookie
/// mirror is handled by the HTTP layer, so this store itself cannot fail.
pub struct MemorySessionStore {
    token: Mutex<SessionToken>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            token: Mutex::new(SessionToken::empty()),
        }
    }

    /// Start with an already-known token, e.g. restored from a request
    /// cookie.
    pub fn with_token(token: SessionToken) -> Self {
        Self {
            token: Mutex::new(token),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionToken> {
        // A poisoned lock only means a writer panicked mid-assignment of a
        // String; the value itself is still coherent.
        self.token.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> SessionToken {
        self.lock().clone()
    }

    fn set(&self, token: SessionToken) -> Result<(), SessionError> {
        *self.lock() = token;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.lock() = SessionToken::empty();
        Ok(())
    }
}
