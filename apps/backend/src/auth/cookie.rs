//! The `auth-token` cookie and its security attributes.

use actix_web::cookie::{Cookie, SameSite};

use crate::state::security_config::SecurityConfig;

/// Name of the cookie carrying the signed identity token.
pub const AUTH_COOKIE_NAME: &str = "auth-token";

/// Build the `auth-token` cookie with the attributes shared by issue and
/// removal: HttpOnly, SameSite=Strict, Path=/, and Secure in production.
pub fn auth_cookie(value: String, security: &SecurityConfig) -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE_NAME, value)
        .http_only(true)
        .secure(security.secure_cookies)
        .same_site(SameSite::Strict)
        .path("/")
        .finish()
}

/// Cookie that instructs the browser to drop `auth-token`.
pub fn removal_cookie(security: &SecurityConfig) -> Cookie<'static> {
    let mut cookie = auth_cookie(String::new(), security);
    cookie.make_removal();
    cookie
}
