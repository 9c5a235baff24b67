//! Comment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Comment entity. Mutation stays with the author even for comments on
/// group posts; group roles do not escalate here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub author_id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub edited_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(author_id: Uuid, post_id: Uuid, content: String) -> Self {
        let now = Utc::now();
        Comment {
            id: Uuid::new_v4(),
            author_id,
            post_id,
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

/// New comment creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub post_id: Uuid,
    pub content: String,
}
