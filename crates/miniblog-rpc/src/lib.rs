//! # miniblog-rpc
//!
//! Native RPC transport adapter for Miniblog.
//!
//! Generated tonic services call into this crate at the top of each
//! handler: [`authenticate`] runs the shared decision procedure against the
//! request metadata and stores the [`Identity`](miniblog_auth::Identity) in
//! the request extensions, where [`IdentityExt`] reads it back.
//!
//! ```rust,ignore
//! async fn get_user(&self, request: Request<GetUserRequest>) -> Result<Response<GetUserResponse>, Status> {
//!     let request = miniblog_rpc::authenticate(&self.authenticator, request).await?;
//!     let caller = request.identity()?;
//!     // ...
//! }
//! ```

mod credentials;
mod extensions;
mod interceptor;
mod status;

pub use credentials::RpcCredentials;
pub use extensions::IdentityExt;
pub use interceptor::{BypassInterceptor, authenticate};
pub use status::{REASON_KEY, to_status};
