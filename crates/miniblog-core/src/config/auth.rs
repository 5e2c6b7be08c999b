//! Authentication configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where request identity comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Verify a signed bearer token and load the user.
    #[default]
    Jwt,
    /// Trust the `X-User-ID` header. Test/internal traffic only.
    Bypass,
}

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_key")]
    pub jwt_key: String,
    /// Default token time-to-live in seconds.
    #[serde(default = "default_expiration")]
    pub expiration_seconds: u64,
    /// Identity source for protected routes.
    #[serde(default)]
    pub mode: AuthMode,
    /// Upper bound on the per-request user lookup, in milliseconds.
    #[serde(default = "default_lookup_timeout")]
    pub lookup_timeout_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_key: default_jwt_key(),
            expiration_seconds: default_expiration(),
            mode: AuthMode::default(),
            lookup_timeout_ms: default_lookup_timeout(),
        }
    }
}

impl AuthConfig {
    /// Default token TTL.
    ///
    /// Saturates at `TimeDelta::MAX` for values chrono cannot represent;
    /// issuing with such a TTL then fails instead of overflowing.
    pub fn expiration(&self) -> chrono::Duration {
        i64::try_from(self.expiration_seconds)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }

    /// Lookup timeout as a `Duration`.
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

fn default_jwt_key() -> String {
    "Rtg8BPKNEf2mB4mgvKONGPZZQSaJWNLijxR42qRgq0iBb5".to_string()
}

fn default_expiration() -> u64 {
    2 * 60 * 60
}

fn default_lookup_timeout() -> u64 {
    3000
}
