//! Token signature and expiry verification.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use miniblog_core::config::AuthConfig;
use miniblog_core::error::AppError;

use super::claims::Claims;

/// Validates bearer tokens against the shared secret.
///
/// Expiry is checked against a caller-supplied instant rather than the
/// library's own clock, and only after the signature has been accepted, so
/// an expired token is never reported as tampered.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self::from_secret(config.jwt_key.as_bytes())
    }

    /// Creates a decoder from a raw secret.
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Decodes and validates `token` as of `now`.
    ///
    /// Checks, in order:
    /// 1. Encoding and signature
    /// 2. Expiration
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
                    AppError::token_signature_invalid("Invalid token signature")
                }
                _ => AppError::token_malformed("Invalid token format"),
            })?;

        if claims.is_expired_at(now) {
            return Err(AppError::token_expired("Token has expired"));
        }

        Ok(claims)
    }
}
