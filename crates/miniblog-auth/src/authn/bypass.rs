//! Trusted-header identity for test and internal traffic.
//!
//! Performs no cryptographic check at all. Only wire it in when the
//! configuration explicitly selects bypass mode.

use super::context::Identity;
use super::credential::CredentialSource;

/// Identity used when the trusted header is absent.
pub const DEFAULT_BYPASS_USER_ID: &str = "user-000001";

/// Reads the caller's identity straight from the `X-User-ID` header.
#[derive(Debug, Clone)]
pub struct BypassAuthenticator {
    default_user_id: String,
}

impl BypassAuthenticator {
    /// Creates a bypass source that falls back to `user-000001`.
    pub fn new() -> Self {
        Self::with_default(DEFAULT_BYPASS_USER_ID)
    }

    /// Creates a bypass source with a custom fallback identity.
    pub fn with_default(default_user_id: impl Into<String>) -> Self {
        Self {
            default_user_id: default_user_id.into(),
        }
    }

    /// Identity for this request; never fails.
    pub fn identify<S>(&self, source: &S) -> Identity
    where
        S: CredentialSource + ?Sized,
    {
        let user_id = source
            .trusted_user_id()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(self.default_user_id.as_str());

        tracing::debug!(user_id = %user_id, "Simulated authentication bypass");
        Identity::from_user_id(user_id)
    }
}

impl Default for BypassAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}
