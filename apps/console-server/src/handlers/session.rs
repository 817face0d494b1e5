//! Session lifecycle handlers.

use actix_web::{HttpResponse, web};

use atrium_core::SessionToken;
use atrium_shared::dto::{LoginRequest, SessionResponse};

use crate::middleware::error::AppResult;
use crate::session::{CurrentSession, expired_cookie, session_cookie};
use crate::state::AppState;

/// POST /api/session
///
/// Exchange credentials for a session: the backend issues the opaque token,
/// which is mirrored into the store and the 7-day cookie. A store write
/// failure degrades to a cookie-only session rather than failing the login.
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let credentials = body.into_inner();
    let session = state.auth.login(&credentials).await?;

    let token = SessionToken::new(session.token.as_str());
    if let Err(e) = state.sessions.set(token.clone()) {
        tracing::warn!(error = %e, "session store write failed, continuing with cookie-only session");
    }

    tracing::info!("session opened");
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&token))
        .json(SessionResponse {
            token: session.token,
        }))
}

/// DELETE /api/session
///
/// Drop the session on both sides. The upstream logout is best effort; the
/// local store and cookie are cleared regardless, and the whole query cache
/// is dropped so nothing fetched under this session is served to the next.
pub async fn logout(
    state: web::Data<AppState>,
    current: CurrentSession,
) -> AppResult<HttpResponse> {
    if current.0.is_present() {
        if let Err(e) = state.auth.logout(&current.0).await {
            tracing::warn!(error = %e, "upstream logout failed");
        }
    }

    if let Err(e) = state.sessions.clear() {
        tracing::warn!(error = %e, "session store clear failed");
    }
    state.queries.clear().await;

    tracing::info!("session closed");
    Ok(HttpResponse::NoContent().cookie(expired_cookie()).finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use async_trait::async_trait;

    use atrium_core::AuthGate;
    use atrium_core::ports::{AuthClient, ResourceClient, SessionStore};
    use atrium_infra::{InMemoryQueryCache, MemorySessionStore, QueryClient};
    use atrium_shared::dto::UserRecord;
    use atrium_shared::{ApiError, ApiResult, FieldError};

    struct StubAuth {
        outcome: ApiResult<SessionResponse>,
    }

    #[async_trait]
    impl AuthClient for StubAuth {
        async fn login(&self, _credentials: &LoginRequest) -> ApiResult<SessionResponse> {
            self.outcome.clone()
        }

        async fn logout(&self, _token: &SessionToken) -> ApiResult<()> {
            Ok(())
        }
    }

    struct StubUsers;

    #[async_trait]
    impl ResourceClient<UserRecord> for StubUsers {
        async fn list_all(&self) -> ApiResult<Vec<UserRecord>> {
            Ok(vec![])
        }

        async fn get_one(&self, _id: &str) -> ApiResult<UserRecord> {
            Err(ApiError::transport("not stubbed"))
        }
    }

    fn state_with(auth: StubAuth) -> AppState {
        AppState {
            sessions: Arc::new(MemorySessionStore::new()),
            gate: Arc::new(AuthGate::default()),
            auth: Arc::new(auth),
            users: Arc::new(StubUsers),
            queries: Arc::new(QueryClient::new(
                Arc::new(InMemoryQueryCache::new()),
                Duration::from_secs(60),
            )),
        }
    }

    fn login_request() -> LoginRequest {
        LoginRequest {
            email: "admin@example.com".to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[actix_web::test]
    async fn login_sets_token_cookie_and_store() {
        let state = state_with(StubAuth {
            outcome: Ok(SessionResponse {
                token: "abc123".to_string(),
            }),
        });
        let sessions = state.sessions.clone();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .route("/api/session", web::post().to(login)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/session")
            .set_json(login_request())
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == "token")
            .expect("token cookie set");
        assert_eq!(cookie.value(), "abc123");
        assert_eq!(sessions.get().as_str(), "abc123");
    }

    #[actix_web::test]
    async fn failed_login_surfaces_field_errors() {
        let state = state_with(StubAuth {
            outcome: Err(
                ApiError::new(vec![FieldError::new("email", "unknown account")]).with_status(401),
            ),
        });

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .route("/api/session", web::post().to(login)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/session")
            .set_json(login_request())
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "unknown account");
    }

    #[actix_web::test]
    async fn logout_drops_per_record_cache_entries() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        use atrium_shared::dto::UserRecord;
        use chrono::Utc;
        use uuid::Uuid;

        struct CountingUsers {
            record: UserRecord,
            calls: Arc<AtomicUsize>,
        }

        #[async_trait]
        impl ResourceClient<UserRecord> for CountingUsers {
            async fn list_all(&self) -> ApiResult<Vec<UserRecord>> {
                Ok(vec![self.record.clone()])
            }

            async fn get_one(&self, _id: &str) -> ApiResult<UserRecord> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                Ok(self.record.clone())
            }
        }

        let record = UserRecord {
            id: Uuid::new_v4(),
            name: "ada".to_string(),
            email: "ada@example.com".to_string(),
            created_at: Utc::now(),
        };
        let id = record.id.to_string();
        let calls = Arc::new(AtomicUsize::new(0));

        let mut state = state_with(StubAuth {
            outcome: Ok(SessionResponse {
                token: "abc123".to_string(),
            }),
        });
        state.users = Arc::new(CountingUsers {
            record,
            calls: calls.clone(),
        });

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .route("/api/session", web::delete().to(logout))
                .route("/api/users/{id}", web::get().to(super::super::users::get_one)),
        )
        .await;

        let uri = format!("/api/users/{id}");
        let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let res =
            test::call_service(&app, test::TestRequest::delete().uri("/api/session").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        // The per-record entry must not survive the session.
        let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[actix_web::test]
    async fn logout_clears_store_and_expires_cookie() {
        let state = state_with(StubAuth {
            outcome: Ok(SessionResponse {
                token: "abc123".to_string(),
            }),
        });
        let sessions = state.sessions.clone();
        sessions.set(SessionToken::new("abc123")).unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .route("/api/session", web::delete().to(logout)),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri("/api/session")
            .cookie(actix_web::cookie::Cookie::new("token", "abc123"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == "token")
            .expect("expiry cookie set");
        assert_eq!(cookie.value(), "");
        assert!(!sessions.get().is_present());
    }
}
