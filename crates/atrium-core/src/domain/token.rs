use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Name of the cookie mirroring the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Lifetime of the session cookie.
pub const TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Opaque bearer credential for the current session.
///
/// The gateway never inspects the token beyond presence: an empty string
/// means "no session", anything else is forwarded verbatim to the backend,
/// which owns expiry and signature checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The "no session" token.
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn is_present(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionToken {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_absent() {
        assert!(!SessionToken::empty().is_present());
        assert!(!SessionToken::new("").is_present());
    }

    #[test]
    fn non_empty_token_is_present() {
        assert!(SessionToken::new("abc123").is_present());
    }

    #[test]
    fn ttl_is_seven_days() {
        assert_eq!(TOKEN_TTL.as_secs(), 604_800);
    }
}
