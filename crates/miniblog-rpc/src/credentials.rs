use tonic::metadata::MetadataMap;

use miniblog_auth::CredentialSource;
use miniblog_auth::authn::{AUTHORIZATION, X_USER_ID};

/// Request metadata seen as a credential source.
///
/// Metadata keys are lowercase on the wire, so the same key names as the
/// HTTP headers apply.
#[derive(Debug, Clone, Copy)]
pub struct RpcCredentials<'a>(pub &'a MetadataMap);

impl CredentialSource for RpcCredentials<'_> {
    fn authorization(&self) -> Option<&[u8]> {
        self.0.get(AUTHORIZATION).map(|v| v.as_encoded_bytes())
    }

    fn trusted_user_id(&self) -> Option<&str> {
        self.0.get(X_USER_ID).and_then(|v| v.to_str().ok())
    }
}
