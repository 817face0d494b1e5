//! Auth-gate middleware.
//!
//! Runs once per request, before any handler: reads the `token` cookie,
//! asks the pure [`AuthGate`] for a verdict, and either lets the request
//! through (stashing the token in request extensions for extractors) or
//! short-circuits with a redirect. No network I/O happens here.

use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpMessage, HttpResponse};
use futures::future::{LocalBoxFuture, Ready, ready};

use atrium_core::AuthGate;

use crate::session::token_from_request;

/// Wrapper registering the gate on an actix `App`.
#[derive(Clone)]
pub struct AuthGateMiddleware {
    gate: Arc<AuthGate>,
}

impl AuthGateMiddleware {
    pub fn new(gate: Arc<AuthGate>) -> Self {
        Self { gate }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGateMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateService {
            service,
            gate: self.gate.clone(),
        }))
    }
}

/// Service produced by [`AuthGateMiddleware`].
pub struct AuthGateService<S> {
    service: S,
    gate: Arc<AuthGate>,
}

impl<S, B> Service<ServiceRequest> for AuthGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = token_from_request(&req);
        let verdict = self.gate.decide(req.path(), &token);

        if let Some(target) = self.gate.redirect_target(verdict) {
            tracing::debug!(path = req.path(), ?verdict, target, "gate redirect");
            let target = target.to_owned();
            let (req, _payload) = req.into_parts();
            let response = HttpResponse::SeeOther()
                .insert_header((header::LOCATION, target))
                .finish()
                .map_into_right_body();
            return Box::pin(async move { Ok(ServiceResponse::new(req, response)) });
        }

        req.extensions_mut().insert(token);
        let fut = self.service.call(req);
        Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
    }
}
