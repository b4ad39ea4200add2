//! User domain types.

use chrono::{DateTime, Utc};

use serelix_core::{Email, UserId};

/// An account holder (domain type).
///
/// Each user owns an isolated set of client records.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login email address (unique).
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Company the user works for, if given.
    pub company: Option<String>,
    /// Whether the user has administrator rights.
    pub is_admin: bool,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

/// Registration input, before the password is hashed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub name: String,
    pub company: Option<String>,
}
