//! Error codes for the catalog API.
//!
//! Every failure the API can report maps to exactly one code here. Codes are
//! SCREAMING_SNAKE_CASE and appear in logs; response bodies carry only the
//! fixed human-readable message.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// No `auth-token` cookie on a protected route
    Unauthenticated,
    /// Token expired
    TokenExpired,
    /// Signature mismatch or malformed token
    TokenInvalid,
    /// Codec failure unrelated to the token contents
    VerificationFailed,
    /// Role guard reached without a verified identity
    NotAuthenticated,
    /// Role outside the route's allow-set
    Forbidden,

    // Request Validation
    InvalidUserId,
    InvalidProductId,
    InvalidRole,
    InvalidStatus,
    RequiredFieldsMissing,
    BadRequest,
    /// JSON body over the extractor's size limit
    PayloadTooLarge,

    // Resource Not Found
    UserNotFound,
    ProductNotFound,

    // System Errors
    StorageError,
    DbUnavailable,
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::TokenInvalid => "TOKEN_INVALID",
            Self::VerificationFailed => "VERIFICATION_FAILED",
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",

            Self::InvalidUserId => "INVALID_USER_ID",
            Self::InvalidProductId => "INVALID_PRODUCT_ID",
            Self::InvalidRole => "INVALID_ROLE",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::RequiredFieldsMissing => "REQUIRED_FIELDS_MISSING",
            Self::BadRequest => "BAD_REQUEST",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",

            Self::StorageError => "STORAGE_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::Unauthenticated.as_str(), "UNAUTHENTICATED");
        assert_eq!(ErrorCode::TokenExpired.as_str(), "TOKEN_EXPIRED");
        assert_eq!(ErrorCode::TokenInvalid.as_str(), "TOKEN_INVALID");
        assert_eq!(ErrorCode::NotAuthenticated.as_str(), "NOT_AUTHENTICATED");
        assert_eq!(ErrorCode::InvalidUserId.as_str(), "INVALID_USER_ID");
        assert_eq!(ErrorCode::StorageError.as_str(), "STORAGE_ERROR");
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", ErrorCode::Forbidden), "FORBIDDEN");
        assert_eq!(
            format!("{}", ErrorCode::RequiredFieldsMissing),
            "REQUIRED_FIELDS_MISSING"
        );
    }
}
