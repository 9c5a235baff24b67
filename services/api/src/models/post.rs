//! Post model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Post entity. When `group_id` is set the post lives inside a group and
/// mutation rights belong to the group's admins and managers rather than
/// the author.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
    pub content: String,
    pub edited_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(author_id: Uuid, content: String, group_id: Option<Uuid>) -> Self {
        let now = Utc::now();
        Post {
            id: Uuid::new_v4(),
            author_id,
            group_id,
            content,
            edited_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the content and stamps the edit. Content is validated by
    /// the caller before this point.
    pub fn edit_content(&mut self, content: String) {
        let now = Utc::now();
        self.content = content;
        self.edited_at = Some(now);
        self.updated_at = now;
    }
}

/// New post creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub content: String,
    pub group_id: Option<Uuid>,
}
