//! Loads the user behind a verified token subject.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use miniblog_core::error::{AppError, ErrorKind};
use miniblog_core::result::AppResult;
use miniblog_entity::User;

/// The one storage capability authentication needs.
///
/// Implementations return `Ok(None)` when no user has the identifier and
/// reserve `Err` for the store itself failing.
#[async_trait]
pub trait UserRetriever: Send + Sync + 'static {
    /// Fetch a user by resource identifier.
    async fn get_user(&self, user_id: &str) -> AppResult<Option<User>>;
}

/// Turns a token subject into a user record with exactly one lookup.
#[derive(Clone)]
pub struct IdentityResolver {
    retriever: Arc<dyn UserRetriever>,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityResolver")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl IdentityResolver {
    /// Creates a resolver with no lookup deadline of its own.
    pub fn new(retriever: Arc<dyn UserRetriever>) -> Self {
        Self {
            retriever,
            timeout: None,
        }
    }

    /// Bounds each lookup; an elapsed deadline counts as storage unavailable.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolves `subject` to its user record.
    ///
    /// Dropping the returned future abandons the lookup, so a cancelled
    /// request stops waiting on storage immediately.
    pub async fn resolve(&self, subject: &str) -> AppResult<User> {
        let lookup = self.retriever.get_user(subject);

        let result = match self.timeout {
            Some(deadline) => tokio::time::timeout(deadline, lookup)
                .await
                .map_err(|_| AppError::storage_unavailable("User lookup timed out"))?,
            None => lookup.await,
        };

        match result {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(AppError::user_not_found(format!(
                "User {subject} not found"
            ))),
            Err(e) if matches!(e.kind, ErrorKind::UserNotFound | ErrorKind::StorageUnavailable) => {
                Err(e)
            }
            Err(e) => {
                tracing::error!(error = %e, "User lookup failed");
                Err(AppError::with_source(
                    ErrorKind::StorageUnavailable,
                    "User store unavailable",
                    e,
                ))
            }
        }
    }
}
