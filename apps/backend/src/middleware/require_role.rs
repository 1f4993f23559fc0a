//! Role authorization middleware
//!
//! Checks the `IdentityClaims` left in request extensions by `JwtExtract`
//! against a `RoleSet` bound when the route was declared. Must be wired
//! inside (after) the verification middleware.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::warn;

use crate::auth::claims::IdentityClaims;
use crate::auth::roles::RoleSet;
use crate::error::AppError;

#[derive(Debug, Clone, Copy)]
pub struct RequireRole {
    allow: RoleSet,
}

impl RequireRole {
    pub const fn new(allow: RoleSet) -> Self {
        Self { allow }
    }

    pub fn allow(&self) -> RoleSet {
        self.allow
    }
}

/// Decide whether a request carrying `claims` may pass a guard over `allow`.
pub fn authorize(claims: Option<&IdentityClaims>, allow: RoleSet) -> Result<(), AppError> {
    let claims = claims.ok_or(AppError::NotAuthenticated)?;
    if allow.permits(&claims.role) {
        Ok(())
    } else {
        warn!(user.id = %claims.id, user.role = %claims.role, allowed = %allow, "role not permitted");
        Err(AppError::Forbidden)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service,
            allow: self.allow,
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: S,
    allow: RoleSet,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let decision = authorize(req.extensions().get::<IdentityClaims>(), self.allow);

        match decision {
            Ok(()) => {
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(err) => {
                let res = req.error_response(err).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_with_role(role: &str) -> IdentityClaims {
        IdentityClaims {
            id: "u-1".to_string(),
            email: "u@example.com".to_string(),
            role: role.to_string(),
            name: "U".to_string(),
            iat: 0,
            exp: i64::MAX,
        }
    }

    #[test]
    fn missing_claims_are_not_authenticated() {
        let result = authorize(None, RoleSet::ADMIN);
        assert!(matches!(result, Err(AppError::NotAuthenticated)));
    }

    #[test]
    fn role_outside_set_is_forbidden() {
        let claims = claims_with_role("user");
        let result = authorize(Some(&claims), RoleSet::ADMIN);
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[test]
    fn role_inside_set_passes() {
        let claims = claims_with_role("user");
        assert!(authorize(Some(&claims), RoleSet::USER_OR_ADMIN).is_ok());
        assert!(authorize(Some(&claims), RoleSet::USER).is_ok());
    }
}
