#![allow(dead_code)]

use actix_web::body::to_bytes;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use actix_http::Request;
use serde_json::Value;

// Logging is auto-installed for every test binary that declares `mod common`.
#[ctor::ctor]
fn init_logging() {
    catalog_test_support::logging::init();
}

/// Call the service and return status and JSON body.
///
/// An `Err` from the service is rendered through `ResponseError` the way
/// the server would.
pub async fn call_json<S>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    match app.call(req).await {
        Ok(resp) => {
            let status = resp.status();
            let body = test::read_body(resp).await;
            (status, parse_body(&body))
        }
        Err(err) => {
            let resp = err.error_response();
            let status = resp.status();
            let body = to_bytes(resp.into_body())
                .await
                .unwrap_or_else(|_| panic!("failed to read error body"));
            (status, parse_body(&body))
        }
    }
}

fn parse_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes).unwrap_or_else(|e| {
        panic!(
            "body should be JSON ({e}): {}",
            String::from_utf8_lossy(bytes)
        )
    })
}

/// Assert the uniform error envelope.
pub fn assert_error(status: StatusCode, body: &Value, expected: StatusCode, message: &str) {
    assert_eq!(status, expected, "body: {body}");
    catalog_test_support::error_envelope::assert_error_envelope_from_parts(
        status,
        body.to_string().as_bytes(),
        expected,
        message,
    );
}
