//! Like model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Like entity. Exactly one of `post_id` or `comment_id` is set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Like {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Like {
    pub fn new(user_id: Uuid, post_id: Option<Uuid>, comment_id: Option<Uuid>) -> Self {
        let now = Utc::now();
        Like {
            id: Uuid::new_v4(),
            user_id,
            post_id,
            comment_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// New like creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLike {
    pub post_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
}
