use std::ops::{Deref, DerefMut};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Error as JsonError;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Largest JSON body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 100 * 1024;

/// JSON body extractor with sanitized 400 responses.
///
/// Parse failures never echo the body or serde's raw message back to the
/// caller; only a coarse category is returned. Bodies over
/// [`MAX_BODY_BYTES`] are rejected with 413 without being buffered.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("")
            .to_string();

        let declared_len = req
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<usize>().ok());

        Box::pin(async move {
            if declared_len.is_some_and(|len| len > MAX_BODY_BYTES) {
                debug!(declared_len = ?declared_len, "JSON body over limit");
                return Err(AppError::PayloadTooLarge {
                    limit: MAX_BODY_BYTES,
                });
            }

            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(error = %e, "failed to read request body chunk");
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    debug!(read = body.len(), "JSON body over limit");
                    return Err(AppError::PayloadTooLarge {
                        limit: MAX_BODY_BYTES,
                    });
                }
                body.extend_from_slice(&chunk);
            }

            let parsed = serde_json::from_slice::<T>(&body).map_err(|e| {
                debug!(
                    category = ?e.classify(),
                    content_type = %content_type,
                    body_size = body.len(),
                    "JSON parsing failed"
                );
                AppError::bad_request(ErrorCode::BadRequest, classify_json_error(&e))
            })?;

            Ok(ValidatedJson(parsed))
        })
    }
}

fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        serde_json::error::Category::Syntax => {
            format!("Invalid JSON at line {}", error.line())
        }
        serde_json::error::Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        serde_json::error::Category::Data => {
            "Invalid JSON: wrong types for one or more fields".to_string()
        }
        serde_json::error::Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct StatusBody {
        status: String,
    }

    #[test]
    fn syntax_errors_report_line_only() {
        let error = serde_json::from_str::<StatusBody>("{\n\"status\": }").unwrap_err();
        assert_eq!(classify_json_error(&error), "Invalid JSON at line 2");
    }

    #[test]
    fn type_errors_do_not_echo_input() {
        let error = serde_json::from_str::<StatusBody>(r#"{"status": 42}"#).unwrap_err();
        let detail = classify_json_error(&error);
        assert!(detail.contains("wrong types"));
        assert!(!detail.contains("42"));
    }

    #[actix_web::test]
    async fn extracts_body_into_target_type() {
        let (req, mut payload) = TestRequest::default()
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"status":"active"}"#)
            .to_http_parts();

        let body = ValidatedJson::<StatusBody>::from_request(&req, &mut payload)
            .await
            .unwrap();
        assert_eq!(body.status, "active");
    }

    #[actix_web::test]
    async fn truncated_body_is_bad_request() {
        let (req, mut payload) = TestRequest::default()
            .set_payload(r#"{"status":"#)
            .to_http_parts();

        let err = ValidatedJson::<StatusBody>::from_request(&req, &mut payload)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert_eq!(err.message(), "Invalid JSON: unexpected end of input");
    }

    #[actix_web::test]
    async fn oversized_body_is_rejected() {
        let oversized = format!(r#"{{"status":"{}"}}"#, "a".repeat(MAX_BODY_BYTES));
        let (req, mut payload) = TestRequest::default()
            .insert_header(("content-type", "application/json"))
            .set_payload(oversized)
            .to_http_parts();

        let err = ValidatedJson::<StatusBody>::from_request(&req, &mut payload)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::PayloadTooLarge);
        assert_eq!(err.status().as_u16(), 413);
        assert_eq!(err.message(), "Request body too large");
    }

    #[actix_web::test]
    async fn body_at_limit_is_read() {
        let padding = MAX_BODY_BYTES - r#"{"status":""}"#.len();
        let exact = format!(r#"{{"status":"{}"}}"#, "a".repeat(padding));
        assert_eq!(exact.len(), MAX_BODY_BYTES);

        let (req, mut payload) = TestRequest::default()
            .set_payload(exact)
            .to_http_parts();

        let body = ValidatedJson::<StatusBody>::from_request(&req, &mut payload)
            .await
            .unwrap();
        assert_eq!(body.status.len(), padding);
    }
}
