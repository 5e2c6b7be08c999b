//! Credential extraction shared by every transport.

use miniblog_core::error::AppError;

/// Header / metadata key carrying the bearer credential.
pub const AUTHORIZATION: &str = "authorization";

/// Trusted header read only by the bypass path.
pub const X_USER_ID: &str = "x-user-id";

const BEARER: &str = "bearer";

/// Read-only view over a transport's request metadata.
pub trait CredentialSource {
    /// Raw bytes of the authorization entry, if present.
    ///
    /// Left undecoded so that a present but non-UTF-8 value is reported as
    /// malformed rather than missing.
    fn authorization(&self) -> Option<&[u8]>;

    /// Raw value of the trusted user-ID entry, if present.
    fn trusted_user_id(&self) -> Option<&str> {
        None
    }
}

/// A bare optional `Authorization` value.
impl CredentialSource for Option<&str> {
    fn authorization(&self) -> Option<&[u8]> {
        self.map(str::as_bytes)
    }
}

/// A bare optional `Authorization` value that may not be valid text.
impl CredentialSource for Option<&[u8]> {
    fn authorization(&self) -> Option<&[u8]> {
        *self
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` value.
///
/// The scheme is matched case-insensitively. A present value with another
/// scheme or no token is malformed, not missing.
pub fn bearer_token(value: &str) -> Result<&str, AppError> {
    let value = value.trim();
    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| AppError::token_malformed("Invalid Authorization header format"))?;

    if !scheme.eq_ignore_ascii_case(BEARER) {
        return Err(AppError::token_malformed(
            "Invalid Authorization header format",
        ));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::token_malformed("Empty bearer token"));
    }
    Ok(token)
}
