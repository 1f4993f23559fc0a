use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::claims::IdentityClaims;
use crate::error::AppError;

/// Verified identity left in request extensions by `JwtExtract`.
///
/// Extraction fails with `NotAuthenticated` when the route was not wrapped
/// in verification or verification ran in optional mode without a token.
#[derive(Debug, Clone)]
pub struct Identity(pub IdentityClaims);

impl Deref for Identity {
    type Target = IdentityClaims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<IdentityClaims>().cloned();
        ready(claims.map(Identity).ok_or(AppError::NotAuthenticated))
    }
}

/// Identity for routes behind optional verification. Never fails.
#[derive(Debug, Clone)]
pub struct MaybeIdentity(pub Option<IdentityClaims>);

impl FromRequest for MaybeIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(MaybeIdentity(
            req.extensions().get::<IdentityClaims>().cloned(),
        )))
    }
}
