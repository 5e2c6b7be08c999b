//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user.
///
/// `user_id` is the permanent `user-xxxxxx` resource identifier. It is kept
/// as a plain string because identifiers minted by older schemes, or
/// injected by the bypass path, need not match the current alphabet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Resource identifier.
    pub user_id: String,
    /// Unique login name.
    pub username: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Display name.
    pub nickname: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Display name (optional).
    pub nickname: Option<String>,
    /// Email address (optional).
    pub email: Option<String>,
    /// Phone number (optional).
    pub phone: Option<String>,
}
