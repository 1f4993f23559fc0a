//! `{id}` path segments parsed as ObjectIds.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bson::oid::ObjectId;
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;

const ID_PARAM: &str = "id";

fn parse_id(req: &HttpRequest, code: ErrorCode, message: &str) -> Result<ObjectId, AppError> {
    req.match_info()
        .get(ID_PARAM)
        .and_then(|raw| ObjectId::parse_str(raw).ok())
        .ok_or_else(|| AppError::bad_request(code, message))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub ObjectId);

impl FromRequest for UserId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_id(req, ErrorCode::InvalidUserId, "Invalid user ID").map(UserId))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductId(pub ObjectId);

impl FromRequest for ProductId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_id(req, ErrorCode::InvalidProductId, "Invalid product ID").map(ProductId))
    }
}
