//! Token verification middleware
//!
//! Reads the `auth-token` cookie, verifies it against the configured secret
//! and stores the resulting `IdentityClaims` in request extensions.
//!
//! In `Required` mode a failure is answered with the matching `AppError`
//! response and the inner service is not called; precedence is missing
//! cookie, then missing secret, then the verification outcome. In
//! `Optional` mode every failure is dropped and the request proceeds
//! without claims.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::{debug, error};

use crate::auth::claims::IdentityClaims;
use crate::auth::cookie::AUTH_COOKIE_NAME;
use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Whether a verification failure rejects the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Required,
    Optional,
}

#[derive(Debug, Clone, Copy)]
pub struct JwtExtract {
    mode: AuthMode,
}

impl JwtExtract {
    pub const fn required() -> Self {
        Self {
            mode: AuthMode::Required,
        }
    }

    pub const fn optional() -> Self {
        Self {
            mode: AuthMode::Optional,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware {
            service,
            mode: self.mode,
        }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
    mode: AuthMode,
}

/// Run the verification steps for one request.
fn authenticate(req: &ServiceRequest) -> Result<IdentityClaims, AppError> {
    let token = req
        .cookie(AUTH_COOKIE_NAME)
        .map(|c| c.value().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(AppError::Unauthenticated)?;

    let app_state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::config("AppState not registered"))?;

    verify_access_token(&token, &app_state.security)
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match (authenticate(&req), self.mode) {
            (Ok(claims), _) => {
                debug!(user.id = %claims.id, user.role = %claims.role, "token verified");
                // Store claims in request extensions BEFORE calling the service
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            // Returned as a response, not an Err, so App-level middleware still applies.
            (Err(err), AuthMode::Required) => {
                let res = req.error_response(err).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
            (Err(err), AuthMode::Optional) => {
                match &err {
                    AppError::ServerMisconfigured | AppError::Config { .. } => {
                        error!(error.code = %err.code(), "optional auth skipped: server misconfigured");
                    }
                    AppError::Unauthenticated => {}
                    _ => debug!(error.code = %err.code(), "optional auth ignored token"),
                }
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
        }
    }
}
