//! Transport-agnostic request authentication.
//!
//! Each transport supplies a [`CredentialSource`] over its own metadata
//! carrier and turns the resulting `AppError` into its own response; the
//! decision procedure itself lives only in [`Authenticator`].

pub mod authenticator;
pub mod bypass;
pub mod context;
pub mod credential;

pub use authenticator::{AuthStage, Authenticator};
pub use bypass::{BypassAuthenticator, DEFAULT_BYPASS_USER_ID};
pub use context::Identity;
pub use credential::{AUTHORIZATION, CredentialSource, X_USER_ID, bearer_token};
