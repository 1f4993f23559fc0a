use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::errors::{DomainError, ErrorCode};

/// Body of every error response: `{ "success": false, "message": ... }`.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthenticated")]
    Unauthenticated,
    #[error("ServerMisconfigured")]
    ServerMisconfigured,
    #[error("TokenExpired")]
    TokenExpired,
    #[error("TokenInvalid")]
    TokenInvalid,
    #[error("Verification failed: {detail}")]
    VerificationFailed { detail: String },
    #[error("NotAuthenticated")]
    NotAuthenticated,
    #[error("Forbidden")]
    Forbidden,
    #[error("Bad request: {message}")]
    BadRequest { code: ErrorCode, message: String },
    #[error("Not found: {message}")]
    NotFound {
        code: ErrorCode,
        message: &'static str,
    },
    #[error("Storage error ({message}): {source}")]
    Storage {
        message: &'static str,
        #[source]
        source: DomainError,
    },
    #[error("Payload too large (limit {limit} bytes)")]
    PayloadTooLarge { limit: usize },
    #[error("Database unavailable")]
    DbUnavailable,
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Unauthenticated => ErrorCode::Unauthenticated,
            AppError::ServerMisconfigured => ErrorCode::ConfigError,
            AppError::TokenExpired => ErrorCode::TokenExpired,
            AppError::TokenInvalid => ErrorCode::TokenInvalid,
            AppError::VerificationFailed { .. } => ErrorCode::VerificationFailed,
            AppError::NotAuthenticated => ErrorCode::NotAuthenticated,
            AppError::Forbidden => ErrorCode::Forbidden,
            AppError::BadRequest { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Storage { .. } => ErrorCode::StorageError,
            AppError::PayloadTooLarge { .. } => ErrorCode::PayloadTooLarge,
            AppError::DbUnavailable => ErrorCode::DbUnavailable,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// The fixed, client-facing message for this error.
    pub fn message(&self) -> String {
        match self {
            AppError::Unauthenticated => {
                "Authentication required - no token in cookies".to_string()
            }
            AppError::ServerMisconfigured => {
                "Server configuration error - JWT secret not found".to_string()
            }
            AppError::TokenExpired => "Token expired".to_string(),
            AppError::TokenInvalid => {
                "Invalid token - signature mismatch. Please login again.".to_string()
            }
            AppError::VerificationFailed { .. } => "Token verification failed".to_string(),
            AppError::NotAuthenticated => "User not authenticated".to_string(),
            AppError::Forbidden => "Insufficient permissions".to_string(),
            AppError::BadRequest { message, .. } => message.clone(),
            AppError::NotFound { message, .. } => (*message).to_string(),
            AppError::Storage { message, .. } => (*message).to_string(),
            AppError::PayloadTooLarge { .. } => "Request body too large".to_string(),
            AppError::DbUnavailable => "Database not initialized".to_string(),
            AppError::Config { .. } => "Server configuration error".to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::ServerMisconfigured => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::TokenExpired => StatusCode::UNAUTHORIZED,
            AppError::TokenInvalid => StatusCode::UNAUTHORIZED,
            AppError::VerificationFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::DbUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn server_misconfigured() -> Self {
        Self::ServerMisconfigured
    }

    pub fn verification_failed(detail: impl Into<String>) -> Self {
        Self::VerificationFailed {
            detail: detail.into(),
        }
    }

    pub fn bad_request(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(code: ErrorCode, message: &'static str) -> Self {
        Self::NotFound { code, message }
    }

    /// Wrap a repository failure behind a fixed public message.
    pub fn storage(message: &'static str) -> impl FnOnce(DomainError) -> Self {
        move |source| Self::Storage { message, source }
    }

    pub fn db_unavailable() -> Self {
        Self::DbUnavailable
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code();

        // Internal detail goes to logs only; the body carries the fixed message.
        if status.is_server_error() {
            error!(error.code = %code, error.detail = %self, "request_failed");
        } else {
            debug!(error.code = %code, "request_rejected");
        }

        HttpResponse::build(status).json(ErrorEnvelope {
            success: false,
            message: self.message(),
        })
    }
}
