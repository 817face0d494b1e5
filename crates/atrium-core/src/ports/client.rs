//! Upstream API client ports.
//!
//! Each domain resource exposes its operations through [`ResourceClient`],
//! decoupling handler code from transport details. All operations resolve
//! to the tagged [`ApiResult`] so callers handle both branches explicitly;
//! transport failures arrive as structured errors, never raw client errors.

use async_trait::async_trait;

use atrium_shared::{ApiResult, dto::LoginRequest, dto::SessionResponse};

use crate::domain::token::SessionToken;

/// Session lifecycle operations against the backend.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Exchange credentials for an opaque session token.
    async fn login(&self, credentials: &LoginRequest) -> ApiResult<SessionResponse>;

    /// Invalidate the token server-side. Best effort; the gateway clears
    /// its own session regardless of the outcome.
    async fn logout(&self, token: &SessionToken) -> ApiResult<()>;
}

/// Read operations every console resource supports.
///
/// No retry at this layer; re-fetch policy belongs to the query layer.
#[async_trait]
pub trait ResourceClient<T>: Send + Sync {
    /// Fetch every record of the resource.
    async fn list_all(&self) -> ApiResult<Vec<T>>;

    /// Fetch a single record by id.
    async fn get_one(&self, id: &str) -> ApiResult<T>;
}
