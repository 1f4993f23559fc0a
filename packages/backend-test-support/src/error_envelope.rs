//! Assertions for the `{ "success": false, "message": ... }` error body.
//!
//! Kept independent of backend types so the contract is checked from the
//! outside, the way a client sees it.

use actix_web::http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ErrorEnvelopeLike {
    success: bool,
    message: String,
}

/// Assert status and exact message of an error body.
pub fn assert_error_envelope_from_parts(
    status: StatusCode,
    body_bytes: &[u8],
    expected_status: StatusCode,
    expected_message: &str,
) {
    let body_str =
        String::from_utf8(body_bytes.to_vec()).expect("Response body should be valid UTF-8");
    assert_eq!(status, expected_status, "unexpected status, body: {body_str}");

    let envelope: ErrorEnvelopeLike = serde_json::from_str(&body_str)
        .unwrap_or_else(|e| panic!("body should be an error envelope ({e}): {body_str}"));

    assert!(!envelope.success, "error envelope must carry success=false");
    assert_eq!(envelope.message, expected_message);
}

/// Same check on a `ServiceResponse` produced by `actix_web::test`.
pub async fn assert_error_envelope_from_service_response(
    resp: actix_web::dev::ServiceResponse<actix_web::body::BoxBody>,
    expected_status: StatusCode,
    expected_message: &str,
) {
    let status = resp.status();
    let body = actix_web::test::read_body(resp).await;
    assert_error_envelope_from_parts(status, &body, expected_status, expected_message);
}

/// Same check on a bare `HttpResponse`, e.g. from `ResponseError::error_response`.
pub async fn assert_error_envelope_from_http_response(
    resp: actix_web::HttpResponse,
    expected_status: StatusCode,
    expected_message: &str,
) {
    let status = resp.status();
    let body = actix_web::body::to_bytes(resp.into_body())
        .await
        .unwrap_or_else(|_| panic!("failed to read response body"));
    assert_error_envelope_from_parts(status, &body, expected_status, expected_message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_envelope() {
        assert_error_envelope_from_parts(
            StatusCode::FORBIDDEN,
            br#"{"success":false,"message":"Insufficient permissions"}"#,
            StatusCode::FORBIDDEN,
            "Insufficient permissions",
        );
    }

    #[test]
    #[should_panic]
    fn rejects_extra_fields() {
        assert_error_envelope_from_parts(
            StatusCode::UNAUTHORIZED,
            br#"{"success":false,"message":"Token expired","stack":"..."}"#,
            StatusCode::UNAUTHORIZED,
            "Token expired",
        );
    }
}
