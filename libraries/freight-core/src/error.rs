/// Outcome taxonomy shared by every core operation
use serde::Serialize;
use thiserror::Error;

/// Result of a core operation. `Ok` is the success case carrying the payload.
pub type Outcome<T> = std::result::Result<T, FreightError>;

/// Failure kinds a core operation can resolve to.
///
/// Transport layers map these 1:1 onto their own status codes; the core never
/// encodes a transport status itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FreightError {
    /// Missing or malformed required fields, caught before any store access
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Business key already taken
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Lookup by identifier yielded nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credential mismatch or unknown identity
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Hashing backend malfunction, store failure, anything unexpected.
    /// The message is user-facing and must stay generic.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Discriminant of an outcome, including success
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Success,
    ValidationFailure,
    Conflict,
    NotFound,
    Unauthorized,
    InternalError,
}

impl FreightError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an unauthorized error
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The outcome kind this failure represents
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Validation(_) => OutcomeKind::ValidationFailure,
            Self::Conflict(_) => OutcomeKind::Conflict,
            Self::NotFound(_) => OutcomeKind::NotFound,
            Self::Unauthorized(_) => OutcomeKind::Unauthorized,
            Self::Internal(_) => OutcomeKind::InternalError,
        }
    }

    /// Human-readable message, without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg)
            | Self::Conflict(msg)
            | Self::NotFound(msg)
            | Self::Unauthorized(msg)
            | Self::Internal(msg) => msg,
        }
    }
}
