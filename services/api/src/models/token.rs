//! Refresh token model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Refresh token entity. The token value is an opaque random string; the
/// store keeps at most one row per (user_id, user_agent) pair, so the token
/// service deletes before it re-issues.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    pub id: Uuid,
    pub token: String,
    pub user_id: Uuid,
    pub expiry_date: DateTime<Utc>,
    pub user_agent: String,
    pub ip_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RefreshToken {
    pub fn new(
        token: String,
        user_id: Uuid,
        expiry_date: DateTime<Utc>,
        user_agent: String,
        ip_address: String,
    ) -> Self {
        let now = Utc::now();
        RefreshToken {
            id: Uuid::new_v4(),
            token,
            user_id,
            expiry_date,
            user_agent,
            ip_address,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the token is past its expiry at the given instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date <= now
    }
}
