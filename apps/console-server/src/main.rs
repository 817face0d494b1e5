//! # Atrium Console Server
//!
//! The actix-web gateway fronting the administrative console: guards
//! navigation with the auth gate, manages the session cookie, and proxies
//! resource reads to the upstream backend through the query cache.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod session;
mod state;
mod telemetry;

use config::AppConfig;
use middleware::gate::AuthGateMiddleware;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&telemetry::TelemetryConfig::from_env());

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    tracing::info!(
        host = %config.host,
        port = config.port,
        upstream = %config.api.base_url,
        "Starting Atrium console server"
    );

    let state = AppState::new(&config).map_err(std::io::Error::other)?;
    let gate = state.gate.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(AuthGateMiddleware::new(gate.clone()))
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
