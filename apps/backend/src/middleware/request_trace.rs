//! Per-request id and tracing span.
//!
//! Accepts a well-formed inbound `x-request-id` or generates one, stores it in
//! request extensions as [`RequestId`], instruments the downstream future with
//! a `request` span carrying `trace_id`, `method` and `path`, and echoes the id
//! on successful responses.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    HttpMessage,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::{info_span, Instrument};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    fn from_inbound(value: Option<&header::HeaderValue>) -> Self {
        value
            .and_then(|v| v.to_str().ok())
            .filter(|v| (1..=64).contains(&v.len()))
            .filter(|v| v.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'))
            .map(|v| RequestId(v.to_string()))
            .unwrap_or_else(|| RequestId(Uuid::new_v4().to_string()))
    }
}

pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware { service }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = RequestId::from_inbound(req.headers().get(REQUEST_ID_HEADER));
        let trace_id = request_id.0.clone();

        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.path()
        );

        req.extensions_mut().insert(request_id);

        let fut = self.service.call(req).instrument(span);

        Box::pin(async move {
            let mut res = fut.await?;

            res.headers_mut().insert(
                header::HeaderName::from_static(REQUEST_ID_HEADER),
                header::HeaderValue::from_str(&trace_id)
                    .unwrap_or_else(|_| header::HeaderValue::from_static("invalid-request-id")),
            );

            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::header::HeaderValue;

    use super::*;

    #[test]
    fn keeps_well_formed_inbound_id() {
        let value = HeaderValue::from_static("abc-123");
        assert_eq!(RequestId::from_inbound(Some(&value)).0, "abc-123");
    }

    #[test]
    fn replaces_suspicious_inbound_id() {
        let value = HeaderValue::from_static("abc 123\\n");
        let id = RequestId::from_inbound(Some(&value));
        assert!(Uuid::parse_str(&id.0).is_ok());

        let missing = RequestId::from_inbound(None);
        assert!(Uuid::parse_str(&missing.0).is_ok());
    }
}
