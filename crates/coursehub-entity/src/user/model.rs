//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user.
///
/// Users are created lazily, by bulk provisioning or by role assignment,
/// and are never deleted by this core.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name, matched case-sensitively.
    pub username: String,
    /// Given name (may be empty).
    pub first_name: String,
    /// Family name (may be empty).
    pub last_name: String,
    /// Argon2id password hash. `None` means the account has no usable
    /// credential and must be given one out-of-band.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Administrative flag. Staff users pass every membership predicate.
    pub is_staff: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if the account has a stored credential.
    pub fn has_usable_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Ordering key for member listings: (first name, last name, username).
    pub fn sort_key(&self) -> (&str, &str, &str) {
        (&self.first_name, &self.last_name, &self.username)
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Pre-hashed password (optional).
    pub password_hash: Option<String>,
    /// Whether the account carries the administrative flag.
    pub is_staff: bool,
}
