use actix_cors::Cors;
use actix_web::http::header;

/// Build credentialed CORS middleware for the browser frontend.
///
/// Credentials must be allowed so the `auth-token` cookie travels with
/// cross-origin requests, which in turn forbids wildcard origins: each
/// origin is added explicitly. Empty, `null` and non-http(s) entries are
/// ignored; with nothing valid left the localhost frontend is used.
pub fn cors_middleware(allowed_origins: &[String]) -> Cors {
    let mut effective_origins: Vec<&str> = allowed_origins
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .collect();

    if effective_origins.is_empty() {
        effective_origins.push(DEFAULT_ORIGIN);
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .supports_credentials()
        .max_age(3600);

    for origin in effective_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}

pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";
