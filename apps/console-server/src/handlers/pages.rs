//! Page anchors for the routes the gate classifies.
//!
//! The console UI itself is rendered by a separate frontend; these handlers
//! exist so the protected and auth-only routes resolve to something real
//! behind the gate.

use actix_web::HttpResponse;

/// GET / - unauthenticated landing.
pub async fn sign_in() -> HttpResponse {
    HttpResponse::Ok().body("Atrium console sign-in")
}

/// GET /forgot-password
pub async fn forgot_password() -> HttpResponse {
    HttpResponse::Ok().body("Atrium console password reset")
}

/// GET /dashboard - authenticated landing. The gate guarantees a token is
/// present by the time this runs.
pub async fn dashboard() -> HttpResponse {
    HttpResponse::Ok().body("Atrium console dashboard")
}
