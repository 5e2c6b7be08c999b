//! Trusted-header identity middleware for test and internal deployments.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use miniblog_auth::BypassAuthenticator;

use super::authn::HttpCredentials;

/// Injects the identity named by `X-User-ID` (or the default user) without
/// looking at any token.
pub async fn simulate_authn(mut request: Request, next: Next) -> Response {
    let identity = BypassAuthenticator::new().identify(&HttpCredentials(request.headers()));
    request.extensions_mut().insert(identity);
    next.run(request).await
}
