//! The authentication decision procedure.

use std::fmt;
use std::sync::Arc;

use miniblog_core::error::AppError;
use miniblog_core::result::AppResult;

use crate::jwt::TokenCodec;
use crate::resolver::IdentityResolver;

use super::context::Identity;
use super::credential::{CredentialSource, bearer_token};

/// How far a request got before it was authorized or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStage {
    /// Nothing read yet.
    Unauthenticated,
    /// An authorization entry was found in the request metadata.
    TokenExtracted,
    /// Signature and expiry checked out.
    TokenVerified,
    /// The subject loaded from storage.
    IdentityResolved,
    /// Identity handed to the transport for injection.
    Authorized,
}

impl fmt::Display for AuthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unauthenticated => "unauthenticated",
            Self::TokenExtracted => "token_extracted",
            Self::TokenVerified => "token_verified",
            Self::IdentityResolved => "identity_resolved",
            Self::Authorized => "authorized",
        };
        f.write_str(name)
    }
}

/// Verifies the bearer credential and resolves the caller.
///
/// Every failure is terminal for the request: the transport must reject
/// without calling the next handler.
#[derive(Debug, Clone)]
pub struct Authenticator {
    codec: Arc<TokenCodec>,
    resolver: IdentityResolver,
}

impl Authenticator {
    /// Creates an authenticator over a codec and resolver.
    pub fn new(codec: Arc<TokenCodec>, resolver: IdentityResolver) -> Self {
        Self { codec, resolver }
    }

    /// The codec used for verification.
    pub fn codec(&self) -> &Arc<TokenCodec> {
        &self.codec
    }

    /// Runs the full procedure against one request's metadata.
    pub async fn authenticate<S>(&self, source: &S) -> AppResult<Identity>
    where
        S: CredentialSource + ?Sized,
    {
        let mut stage = AuthStage::Unauthenticated;
        let result = self.run(source, &mut stage).await;

        match &result {
            Ok(identity) => {
                tracing::debug!(user_id = %identity.user_id, stage = %stage, "Request authenticated");
            }
            Err(err) if err.kind.is_authentication() => {
                tracing::warn!(reason = %err.kind, stage = %stage, "Request authentication rejected");
            }
            Err(err) => {
                tracing::error!(error = %err, stage = %stage, "Request authentication failed unexpectedly");
            }
        }

        result
    }

    async fn run<S>(&self, source: &S, stage: &mut AuthStage) -> AppResult<Identity>
    where
        S: CredentialSource + ?Sized,
    {
        let raw = source
            .authorization()
            .ok_or_else(|| AppError::no_credential("Missing Authorization header"))?;
        *stage = AuthStage::TokenExtracted;

        let raw = std::str::from_utf8(raw)
            .map_err(|_| AppError::token_malformed("Authorization header is not valid UTF-8"))?;
        let token = bearer_token(raw)?;

        let claims = self.codec.verify(token)?;
        *stage = AuthStage::TokenVerified;
        tracing::debug!(user_id = %claims.subject(), "Token parsing successful");

        let user = self.resolver.resolve(claims.subject()).await?;
        *stage = AuthStage::IdentityResolved;

        let identity = Identity::from(&user);
        *stage = AuthStage::Authorized;
        Ok(identity)
    }
}
