//! Identity attached to a request after authentication.

use serde::{Deserialize, Serialize};

use miniblog_entity::User;

/// Who the caller is, for the duration of one request.
///
/// Transports store it in the request's own extensions; it is never shared
/// between requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Resource identifier of the caller.
    pub user_id: String,
    /// Login name; absent when injected by the bypass path.
    pub username: Option<String>,
}

impl Identity {
    /// Identity with only a user ID.
    pub fn from_user_id(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: None,
        }
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id.clone(),
            username: Some(user.username.clone()),
        }
    }
}
