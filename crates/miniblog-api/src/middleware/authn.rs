//! Bearer-token authentication middleware.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use miniblog_auth::authn::{AUTHORIZATION, X_USER_ID};
use miniblog_auth::CredentialSource;

use crate::error::ApiError;
use crate::state::AppState;

/// HTTP headers seen as a credential source.
#[derive(Debug, Clone, Copy)]
pub struct HttpCredentials<'a>(pub &'a HeaderMap);

impl CredentialSource for HttpCredentials<'_> {
    fn authorization(&self) -> Option<&[u8]> {
        self.0.get(AUTHORIZATION).map(|v| v.as_bytes())
    }

    fn trusted_user_id(&self) -> Option<&str> {
        self.0.get(X_USER_ID).and_then(|v| v.to_str().ok())
    }
}

/// Rejects the request unless it carries a valid bearer token for an
/// existing user; on success the resolved `Identity` is placed in the
/// request extensions and the next handler runs.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = state
        .authenticator
        .authenticate(&HttpCredentials(request.headers()))
        .await?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}
