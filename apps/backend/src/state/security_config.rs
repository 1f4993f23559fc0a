use jsonwebtoken::Algorithm;

/// Configuration for token verification and the auth cookie.
///
/// Built once at startup and shared read-only by every request.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Shared secret for signing and verifying tokens; `None` when the
    /// process was started without one.
    jwt_secret: Option<Vec<u8>>,
    /// Algorithm used when minting (defaults to HS256); verification accepts any HMAC variant
    pub algorithm: Algorithm,
    /// Whether the auth cookie carries the `Secure` attribute
    pub secure_cookies: bool,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: Some(jwt_secret.into()),
            algorithm: Algorithm::HS256,
            secure_cookies: false,
        }
    }

    /// A configuration with no secret. Token verification reports a
    /// server misconfiguration instead of checking anything.
    pub fn without_secret() -> Self {
        Self {
            jwt_secret: None,
            algorithm: Algorithm::HS256,
            secure_cookies: false,
        }
    }

    pub fn from_optional_secret(jwt_secret: Option<String>) -> Self {
        match jwt_secret {
            Some(secret) if !secret.is_empty() => Self::new(secret.into_bytes()),
            _ => Self::without_secret(),
        }
    }

    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    pub fn jwt_secret(&self) -> Option<&[u8]> {
        self.jwt_secret.as_deref()
    }

    pub fn has_secret(&self) -> bool {
        self.jwt_secret.is_some()
    }
}
