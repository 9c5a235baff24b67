//! Block models: site-wide user blocks and group-scoped blocks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Directional site-wide block; at most one per ordered pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserBlock {
    pub id: Uuid,
    pub blocker_id: Uuid,
    pub blocked_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserBlock {
    pub fn new(blocker_id: Uuid, blocked_id: Uuid) -> Self {
        let now = Utc::now();
        UserBlock {
            id: Uuid::new_v4(),
            blocker_id,
            blocked_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Block scoped to one group; created and removed by the group's
/// managers or admins.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GroupBlock {
    pub id: Uuid,
    pub blocker_id: Uuid,
    pub blocked_id: Uuid,
    pub group_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GroupBlock {
    pub fn new(blocker_id: Uuid, blocked_id: Uuid, group_id: Uuid) -> Self {
        let now = Utc::now();
        GroupBlock {
            id: Uuid::new_v4(),
            blocker_id,
            blocked_id,
            group_id,
            created_at: now,
            updated_at: now,
        }
    }
}
