//! Application state - shared across all handlers.

use std::sync::Arc;

use atrium_core::AuthGate;
use atrium_core::ports::{AuthClient, ResourceClient, SessionStore};
use atrium_infra::client::RestClientError;
use atrium_infra::{InMemoryQueryCache, MemorySessionStore, QueryClient, RestClient, RestResource};
use atrium_shared::dto::UserRecord;

use crate::config::AppConfig;

/// Shared application state.
///
/// Everything auth-related flows through the injected `sessions` handle;
/// there is no process-global token anywhere.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionStore>,
    pub gate: Arc<AuthGate>,
    pub auth: Arc<dyn AuthClient>,
    pub users: Arc<dyn ResourceClient<UserRecord>>,
    pub queries: Arc<QueryClient>,
}

impl AppState {
    /// Wire the adapters together from configuration.
    pub fn new(config: &AppConfig) -> Result<Self, RestClientError> {
        let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        let client = Arc::new(RestClient::new(config.api.clone(), sessions.clone())?);
        let users: Arc<RestResource<UserRecord>> = Arc::new(RestResource::new(client.clone(), "users"));
        let queries = Arc::new(QueryClient::new(
            Arc::new(InMemoryQueryCache::new()),
            config.query_ttl,
        ));

        tracing::info!("Application state initialized");

        Ok(Self {
            sessions,
            gate: Arc::new(AuthGate::new(config.routes.clone())),
            auth: client,
            users,
            queries,
        })
    }
}
