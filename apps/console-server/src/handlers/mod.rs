//! HTTP handlers and route configuration.

mod health;
mod pages;
mod session;
mod users;

use actix_web::web;

/// Configure all application routes.
///
/// The page anchors at the top are what the auth gate classifies; the
/// `/api` scope carries the session lifecycle and the resource proxies.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(pages::sign_in))
        .route("/forgot-password", web::get().to(pages::forgot_password))
        .route("/dashboard", web::get().to(pages::dashboard))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/session")
                        .route("", web::post().to(session::login))
                        .route("", web::delete().to(session::logout)),
                )
                .service(
                    web::scope("/users")
                        .route("", web::get().to(users::list))
                        .route("/{id}", web::get().to(users::get_one)),
                ),
        );
}
