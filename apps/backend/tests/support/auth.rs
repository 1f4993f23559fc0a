//! Token and cookie helpers for tests

use std::time::{Duration, SystemTime};

use actix_web::cookie::Cookie;
use catalog_api::auth::cookie::AUTH_COOKIE_NAME;
use catalog_api::auth::jwt::{mint_access_token, TokenSubject, ACCESS_TOKEN_TTL_SECS};
use catalog_api::state::security_config::SecurityConfig;

use super::TEST_SECRET;

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET)
}

/// Mint a token for `id` with `role` under the test secret.
pub fn mint_token(id: &str, role: &str) -> String {
    mint_token_with(id, role, SystemTime::now(), &test_security())
}

pub fn mint_token_with(id: &str, role: &str, now: SystemTime, sec: &SecurityConfig) -> String {
    let email = format!("{id}@example.test");
    mint_access_token(
        TokenSubject {
            id,
            email: &email,
            role,
            name: "Test User",
        },
        now,
        sec,
    )
    .expect("should mint token successfully")
}

/// A correctly signed token whose `exp` is an hour in the past.
pub fn mint_expired_token(id: &str, role: &str) -> String {
    let past = SystemTime::now()
        .checked_sub(Duration::from_secs(ACCESS_TOKEN_TTL_SECS as u64 + 3600))
        .expect("clock should allow subtraction");
    mint_token_with(id, role, past, &test_security())
}

/// A token signed with a different secret.
pub fn mint_foreign_token(id: &str, role: &str) -> String {
    mint_token_with(
        id,
        role,
        SystemTime::now(),
        &SecurityConfig::new("some-other-secret"),
    )
}

pub fn auth_cookie(token: &str) -> Cookie<'static> {
    Cookie::new(AUTH_COOKIE_NAME, token.to_string())
}
