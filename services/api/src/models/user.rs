//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Site-wide role carried by every account. Admins can reach the admin
/// area routes; everything else is gated per relationship or group role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "User",
            UserRole::Admin => "Admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(UserRole::User),
            "Admin" => Ok(UserRole::Admin),
            other => Err(format!("Unknown user role: {}", other)),
        }
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh user record. The id and timestamps are assigned here,
    /// never by the store.
    pub fn new(username: String, email: String, role: UserRole, password_hash: String) -> Self {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            username,
            email,
            role,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// New user creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// User update payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}
