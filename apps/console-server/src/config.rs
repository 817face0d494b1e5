//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use atrium_core::{RouteTable, RouteTableError};
use atrium_infra::RestClientConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub api: RestClientConfig,
    /// How long query results stay fresh.
    pub query_ttl: Duration,
    pub routes: RouteTable,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Routes(#[from] RouteTableError),
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api = RestClientConfig {
            base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| RestClientConfig::default().base_url),
            timeout: Duration::from_secs(
                env::var("API_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            api,
            query_ttl: Duration::from_secs(
                env::var("QUERY_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            routes: Self::route_table()?,
        })
    }

    /// Build the route table: the stock partition extended with any paths
    /// from `PROTECTED_PATHS` / `AUTH_ONLY_PATHS` (comma-separated).
    fn route_table() -> Result<RouteTable, RouteTableError> {
        Self::route_table_with(
            Self::paths_from("PROTECTED_PATHS"),
            Self::paths_from("AUTH_ONLY_PATHS"),
        )
    }

    fn route_table_with(
        extra_protected: Vec<String>,
        extra_auth_only: Vec<String>,
    ) -> Result<RouteTable, RouteTableError> {
        let mut protected = vec!["/dashboard".to_string()];
        let mut auth_only = vec!["/".to_string(), "/forgot-password".to_string()];

        protected.extend(extra_protected);
        auth_only.extend(extra_auth_only);

        RouteTable::new(protected, auth_only)
    }

    fn paths_from(var: &str) -> Vec<String> {
        env::var(var)
            .map(|raw| Self::split_paths(&raw))
            .unwrap_or_default()
    }

    fn split_paths(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect()
    }
}
