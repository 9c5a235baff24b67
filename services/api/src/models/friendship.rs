//! Friendship model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Friendship entity. One row per unordered user pair; `user1_id` is the
/// requester under the creation convention and `accepted_at` stays null
/// until the recipient accepts.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Friendship {
    pub id: Uuid,
    pub user1_id: Uuid,
    pub user2_id: Uuid,
    pub requested_by_id: Uuid,
    pub accepted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Friendship {
    pub fn new(requester_id: Uuid, other_id: Uuid) -> Self {
        let now = Utc::now();
        Friendship {
            id: Uuid::new_v4(),
            user1_id: requester_id,
            user2_id: other_id,
            requested_by_id: requester_id,
            accepted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted_at.is_some()
    }

    /// Marks the friendship accepted. Accepting twice is a state
    /// violation reported as an error, not a panic.
    pub fn accept(&mut self) -> Result<(), String> {
        if self.accepted_at.is_some() {
            return Err("Friendship has already been accepted.".to_string());
        }
        let now = Utc::now();
        self.accepted_at = Some(now);
        self.updated_at = now;
        Ok(())
    }
}
