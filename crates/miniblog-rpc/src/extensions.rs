use tonic::{Request, Status};

use miniblog_auth::Identity;

/// Access to the identity attached by [`authenticate`](crate::authenticate)
/// or [`BypassInterceptor`](crate::BypassInterceptor).
pub trait IdentityExt {
    /// The caller, or `Unauthenticated` if no adapter ran.
    fn identity(&self) -> Result<&Identity, Status>;
}

impl<T> IdentityExt for Request<T> {
    fn identity(&self) -> Result<&Identity, Status> {
        self.extensions()
            .get::<Identity>()
            .ok_or_else(|| Status::unauthenticated("Authentication required"))
    }
}
