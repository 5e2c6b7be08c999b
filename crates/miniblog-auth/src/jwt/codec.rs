//! Issue/verify/refresh over one secret and one clock.

use std::sync::Arc;

use chrono::Duration;

use miniblog_core::clock::{Clock, SystemClock};
use miniblog_core::config::AuthConfig;
use miniblog_core::error::AppError;

use super::claims::Claims;
use super::decoder::JwtDecoder;
use super::encoder::{IssuedToken, JwtEncoder};

/// Signs and verifies bearer tokens.
///
/// Pure CPU work; the secret is fixed at construction and the codec is
/// shared read-only across requests.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// Builds a codec from configuration using the system clock.
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Builds a codec that reads time from `clock`.
    pub fn with_clock(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
            clock,
        }
    }

    /// Issues a token for `subject` that expires `ttl` from now.
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<IssuedToken, AppError> {
        self.encoder.issue_at(subject, ttl, self.clock.now())
    }

    /// Issues a token with the configured default TTL.
    pub fn issue_default(&self, subject: &str) -> Result<IssuedToken, AppError> {
        self.issue(subject, self.encoder.default_ttl())
    }

    /// Verifies a token and returns its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        self.decoder.verify_at(token, self.clock.now())
    }

    /// Extends an authenticated subject's session with a new token.
    ///
    /// Nothing is stored server side; the old token simply lives until its
    /// own expiry.
    pub fn refresh(&self, subject: &str) -> Result<IssuedToken, AppError> {
        tracing::debug!(user_id = %subject, "Refreshing token");
        self.issue_default(subject)
    }
}
