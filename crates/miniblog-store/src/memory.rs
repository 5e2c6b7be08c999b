//! In-memory user store backed by `DashMap`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use miniblog_auth::UserRetriever;
use miniblog_core::error::AppError;
use miniblog_core::result::AppResult;
use miniblog_core::types::id::{IdGenerator, ResourceType};
use miniblog_entity::{CreateUser, User};

use crate::user::{UserStore, normalize_username};

/// Users keyed by resource identifier, with a username index.
///
/// Identifiers come from a per-process monotonic counter; with a fixed
/// salt they are unique for this process only.
#[derive(Debug, Clone)]
pub struct MemoryUserStore {
    users: Arc<DashMap<String, User>>,
    /// username → user_id
    usernames: Arc<DashMap<String, String>>,
    counter: Arc<AtomicU64>,
    ids: IdGenerator,
}

impl MemoryUserStore {
    /// Creates an empty store that mints identifiers with `ids`.
    pub fn new(ids: IdGenerator) -> Self {
        Self {
            users: Arc::new(DashMap::new()),
            usernames: Arc::new(DashMap::new()),
            counter: Arc::new(AtomicU64::new(1)),
            ids,
        }
    }

    fn next_id(&self) -> String {
        let counter = self.counter.fetch_add(1, Ordering::Relaxed);
        self.ids.generate(ResourceType::User, counter).into_string()
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new(IdGenerator::default())
    }
}

#[async_trait]
impl UserRetriever for MemoryUserStore {
    async fn get_user(&self, user_id: &str) -> AppResult<Option<User>> {
        Ok(self.users.get(user_id).map(|u| u.value().clone()))
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, input: CreateUser) -> AppResult<User> {
        let username = normalize_username(&input.username).to_string();
        if username.is_empty() {
            return Err(AppError::validation("Username must not be empty"));
        }

        let user_id = match self.usernames.entry(username.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict(format!(
                    "Username {username} already exists"
                )));
            }
            Entry::Vacant(slot) => {
                let user_id = self.next_id();
                slot.insert(user_id.clone());
                user_id
            }
        };

        let now = Utc::now();
        let user = User {
            user_id: user_id.clone(),
            username,
            password_hash: input.password_hash,
            nickname: input.nickname,
            email: input.email,
            phone: input.phone,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(user_id, user.clone());

        tracing::info!(user_id = %user.user_id, username = %user.username, "User created");
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let Some(user_id) = self
            .usernames
            .get(normalize_username(username))
            .map(|id| id.value().clone())
        else {
            return Ok(None);
        };
        self.get_user(&user_id).await
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.users.len() as u64)
    }
}
