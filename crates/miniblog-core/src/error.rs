//! Unified application error types for Miniblog.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Transports match on [`ErrorKind`]
//! exhaustively to pick a status code; the message is the only text that
//! ever reaches a client.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The request carried no bearer credential at all.
    NoCredential,
    /// The credential could not be parsed as a token.
    TokenMalformed,
    /// The token signature does not match the signing secret.
    TokenSignatureInvalid,
    /// The token was valid but its expiry has passed.
    TokenExpired,
    /// The token subject does not resolve to a stored user.
    UserNotFound,
    /// The user store could not be reached (transient).
    StorageUnavailable,
    /// Username/password did not match.
    InvalidCredentials,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry).
    Conflict,
    /// The requested resource was not found.
    NotFound,
    /// An internal server error occurred.
    Internal,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl ErrorKind {
    /// Stable machine-readable reason carried in every error response body.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NoCredential => "Unauthenticated.NoCredential",
            Self::TokenMalformed => "Unauthenticated.TokenMalformed",
            Self::TokenSignatureInvalid => "Unauthenticated.TokenSignatureInvalid",
            Self::TokenExpired => "Unauthenticated.TokenExpired",
            Self::UserNotFound => "NotFound.UserNotFound",
            Self::StorageUnavailable => "Unavailable.StorageUnavailable",
            Self::InvalidCredentials => "Unauthenticated.InvalidCredentials",
            Self::Validation => "InvalidParameter",
            Self::Conflict => "AlreadyExists",
            Self::NotFound => "NotFound",
            Self::Internal => "InternalError",
            Self::Configuration => "InternalError.Configuration",
            Self::Serialization => "InternalError.Serialization",
        }
    }

    /// Whether this kind belongs to the request-authentication taxonomy.
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            Self::NoCredential
                | Self::TokenMalformed
                | Self::TokenSignatureInvalid
                | Self::TokenExpired
                | Self::UserNotFound
                | Self::StorageUnavailable
        )
    }

    /// Only a transient storage failure may be retried upstream.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageUnavailable)
    }

    /// Internal kinds have their message replaced before leaving the process.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Internal | Self::Configuration | Self::Serialization
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// The unified application error used throughout Miniblog.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a missing-credential error.
    pub fn no_credential(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoCredential, message)
    }

    /// Create a malformed-token error.
    pub fn token_malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenMalformed, message)
    }

    /// Create a bad-signature error.
    pub fn token_signature_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenSignatureInvalid, message)
    }

    /// Create an expired-token error.
    pub fn token_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenExpired, message)
    }

    /// Create a user-not-found error.
    pub fn user_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UserNotFound, message)
    }

    /// Create a storage-unavailable error.
    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StorageUnavailable, message)
    }

    /// Create an invalid-credentials (login) error.
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCredentials, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Message safe to hand to a client.
    pub fn public_message(&self) -> &str {
        if self.kind.is_internal() {
            "Internal server error"
        } else {
            &self.message
        }
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
