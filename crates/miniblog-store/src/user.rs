//! User storage operations beyond the authentication lookup.

use async_trait::async_trait;

use miniblog_auth::UserRetriever;
use miniblog_core::result::AppResult;
use miniblog_entity::{CreateUser, User};

/// Canonical form of a login name, applied on every write and lookup.
pub fn normalize_username(username: &str) -> &str {
    username.trim()
}

/// Full user store used by the handlers.
///
/// Authentication only ever sees the narrower [`UserRetriever`].
#[async_trait]
pub trait UserStore: UserRetriever {
    /// Persist a new user and assign it a resource identifier.
    async fn create(&self, input: CreateUser) -> AppResult<User>;

    /// Find a user by login name, after [`normalize_username`].
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Number of stored users.
    async fn count(&self) -> AppResult<u64>;
}
