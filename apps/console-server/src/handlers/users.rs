//! Users resource proxy.
//!
//! Reads go through the query layer: one cache key per query, shared
//! in-flight requests, TTL freshness. The upstream client is only hit on a
//! cache miss.

use actix_web::web;

use atrium_shared::dto::UserRecord;

use crate::middleware::error::AppResult;
use crate::state::AppState;

const USERS_KEY: &str = "users";

fn user_key(id: &str) -> String {
    format!("{USERS_KEY}:{id}")
}

/// GET /api/users
pub async fn list(state: web::Data<AppState>) -> AppResult<web::Json<Vec<UserRecord>>> {
    let client = state.users.clone();
    let users = state
        .queries
        .fetch(USERS_KEY, move || async move { client.list_all().await })
        .await?;
    Ok(web::Json(users))
}

/// GET /api/users/{id}
pub async fn get_one(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<web::Json<UserRecord>> {
    let id = path.into_inner();
    let key = user_key(&id);
    let client = state.users.clone();
    let user = state
        .queries
        .fetch(&key, move || async move { client.get_one(&id).await })
        .await?;
    Ok(web::Json(user))
}
