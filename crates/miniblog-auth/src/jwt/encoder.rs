//! Token creation with configurable signing and TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use miniblog_core::config::AuthConfig;
use miniblog_core::error::AppError;

use super::claims::Claims;

/// Creates signed HS256 bearer tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// TTL used when the caller does not supply one.
    default_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

/// A freshly signed token and its absolute expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Compact token string.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self::from_secret(config.jwt_key.as_bytes(), config.expiration())
    }

    /// Creates an encoder from a raw secret.
    pub fn from_secret(secret: &[u8], default_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            default_ttl,
        }
    }

    /// The configured default TTL.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Signs a token for `subject` that expires `ttl` after `now`.
    pub fn issue_at(
        &self,
        subject: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        if subject.is_empty() {
            return Err(AppError::validation("Token subject must not be empty"));
        }
        if ttl <= Duration::zero() {
            return Err(AppError::validation("Token TTL must be positive"));
        }

        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::validation("Token TTL is out of range"))?;
        let claims = Claims::new(subject, now, expires_at);

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok(IssuedToken {
            token,
            expires_at: claims.expires_at(),
        })
    }
}
