//! Storage-level error type returned by repositories.
//!
//! This error type is HTTP agnostic. Handlers decide which public message a
//! failure maps to and convert into `crate::error::AppError` themselves.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A stored document could not be interpreted
    Decode(String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Decode(d) => write!(f, "decode error: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn decode(detail: impl Into<String>) -> Self {
        Self::Decode(detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
}

impl From<mongodb::error::Error> for DomainError {
    fn from(e: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        let kind = match e.kind.as_ref() {
            ErrorKind::ServerSelection { .. } => InfraErrorKind::DbUnavailable,
            ErrorKind::BsonDeserialization(_) => InfraErrorKind::DataCorruption,
            ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::TimedOut => {
                InfraErrorKind::Timeout
            }
            _ => InfraErrorKind::Other("mongodb".to_string()),
        };
        DomainError::infra(kind, e.to_string())
    }
}
