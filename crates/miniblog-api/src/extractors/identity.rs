//! `CurrentUser` extractor: reads the identity placed in request
//! extensions by the authentication or bypass middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use miniblog_auth::Identity;
use miniblog_core::error::AppError;

use crate::error::ApiError;

/// Authenticated caller available in handlers.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl CurrentUser {
    /// Resource identifier of the caller.
    pub fn user_id(&self) -> &str {
        &self.0.user_id
    }
}

impl std::ops::Deref for CurrentUser {
    type Target = Identity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only reachable without an identity if a route was mounted outside
        // the authenticated group.
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError::no_credential("Authentication required").into())
    }
}
