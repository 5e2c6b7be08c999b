//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use miniblog_auth::{Authenticator, IdentityResolver, PasswordHasher, TokenCodec, UserRetriever};
use miniblog_core::config::AppConfig;
use miniblog_store::UserStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks, and none of
/// them is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Process start time
    pub started_at: DateTime<Utc>,

    // ── Auth ─────────────────────────────────────────────────
    /// Token issue/verify/refresh
    pub codec: Arc<TokenCodec>,
    /// Bearer-token authentication procedure
    pub authenticator: Arc<Authenticator>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,

    // ── Storage ──────────────────────────────────────────────
    /// User store
    pub users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("mode", &self.config.auth.mode)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wires the auth components around `users` and `retriever`.
    ///
    /// `retriever` is normally the same store as `users`, seen through the
    /// single lookup capability authentication is allowed to use.
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        retriever: Arc<dyn UserRetriever>,
        codec: Arc<TokenCodec>,
    ) -> Self {
        let resolver = IdentityResolver::new(retriever).with_timeout(config.auth.lookup_timeout());
        let authenticator = Arc::new(Authenticator::new(Arc::clone(&codec), resolver));

        Self {
            config: Arc::new(config),
            started_at: Utc::now(),
            codec,
            authenticator,
            password_hasher: Arc::new(PasswordHasher::new()),
            users,
        }
    }
}
