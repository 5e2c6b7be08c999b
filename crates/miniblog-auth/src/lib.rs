//! # miniblog-auth
//!
//! Request authentication and identity resolution for Miniblog, shared by
//! every transport.
//!
//! ## Modules
//!
//! - `jwt`: bearer token claims, issuing, verification, and refresh
//! - `resolver`: loads the user behind a verified token subject
//! - `authn`: the transport-agnostic decision procedure and the bypass path
//! - `password`: Argon2id password hashing for login

pub mod authn;
pub mod jwt;
pub mod password;
pub mod resolver;

pub use authn::{
    AuthStage, Authenticator, BypassAuthenticator, CredentialSource, Identity,
};
pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder, TokenCodec};
pub use password::PasswordHasher;
pub use resolver::{IdentityResolver, UserRetriever};
