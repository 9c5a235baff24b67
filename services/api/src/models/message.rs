//! Direct message model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Direct message entity. Content mutation belongs to the sender;
/// read-state mutation belongs to the receiver.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub is_read: bool,
    pub edited_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Message {
    pub fn new(sender_id: Uuid, receiver_id: Uuid, content: String) -> Self {
        let now = Utc::now();
        Message {
            id: Uuid::new_v4(),
            sender_id,
            receiver_id,
            content,
            is_read: false,
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

    pub fn mark_as_read(&mut self) {
        self.is_read = true;
        self.updated_at = Utc::now();
    }
}

/// New message creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    pub receiver_id: Uuid,
    pub content: String,
}
