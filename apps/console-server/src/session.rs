//! Cookie plumbing for the session token.
//!
//! The cookie is the persistent mirror of the session store: it is what
//! survives restarts of either side and what the auth gate reads on every
//! navigation. Writes happen on login/logout responses only.

use std::future::{Ready, ready};

use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::dev::{Payload, ServiceRequest};
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use atrium_core::SessionToken;
use atrium_core::domain::token::{TOKEN_COOKIE, TOKEN_TTL};

/// Cookie carrying the token, valid for seven days.
pub fn session_cookie(token: &SessionToken) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, token.as_str().to_owned())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(TOKEN_TTL.as_secs() as i64))
        .finish()
}

/// Expired replacement cookie, used to delete the stored one.
pub fn expired_cookie() -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::ZERO)
        .finish()
}

/// Token from the request cookie; empty when the cookie is absent.
pub fn token_from_request(req: &ServiceRequest) -> SessionToken {
    req.cookie(TOKEN_COOKIE)
        .map(|c| SessionToken::new(c.value()))
        .unwrap_or_else(SessionToken::empty)
}

/// Extractor handing handlers the session token for the current request.
///
/// The auth gate stores the token in request extensions after reading the
/// cookie; requests that bypass the gate (tests, direct API calls) fall
/// back to the cookie itself.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub SessionToken);

impl FromRequest for CurrentSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        if let Some(token) = req.extensions().get::<SessionToken>() {
            return ready(Ok(CurrentSession(token.clone())));
        }
        let token = req
            .cookie(TOKEN_COOKIE)
            .map(|c| SessionToken::new(c.value()))
            .unwrap_or_else(SessionToken::empty);
        ready(Ok(CurrentSession(token)))
    }
}
