//! Per-request authentication for RPC handlers.

use tonic::service::Interceptor;
use tonic::{Request, Status};

use miniblog_auth::{Authenticator, BypassAuthenticator};

use crate::credentials::RpcCredentials;
use crate::status::to_status;

/// Authenticates `request` from its metadata and attaches the identity.
///
/// Storage lookup is async, so this runs inside the handler rather than as
/// a tonic [`Interceptor`]. On failure the returned status is the one the
/// handler should return unchanged.
pub async fn authenticate<T>(
    authenticator: &Authenticator,
    mut request: Request<T>,
) -> Result<Request<T>, Status> {
    let identity = authenticator
        .authenticate(&RpcCredentials(request.metadata()))
        .await
        .map_err(|e| to_status(&e))?;

    request.extensions_mut().insert(identity);
    Ok(request)
}

/// Interceptor that trusts the `x-user-id` metadata entry.
///
/// Never touches the token codec; only install it when bypass mode is
/// configured.
#[derive(Debug, Clone, Default)]
pub struct BypassInterceptor {
    inner: BypassAuthenticator,
}

impl BypassInterceptor {
    /// Creates an interceptor that falls back to `fallback_user_id`.
    pub fn with_default(fallback_user_id: impl Into<String>) -> Self {
        Self {
            inner: BypassAuthenticator::with_default(fallback_user_id),
        }
    }
}

impl Interceptor for BypassInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let identity = self.inner.identify(&RpcCredentials(request.metadata()));
        request.extensions_mut().insert(identity);
        Ok(request)
    }
}
