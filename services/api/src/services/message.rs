//! Direct message service
//!
//! Messages are sender-owned for edits and deletes; read state belongs to
//! the receiver and is flipped in bulk through mark-as-read.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::{Message, NewMessage};
use crate::store::{MessageFilter, Store};
use crate::validation::{validate_message_content, validate_message_parties};

use super::{ServiceError, ServiceResult, store_failure};

/// Message service
#[derive(Clone)]
pub struct MessageService {
    store: Arc<dyn Store>,
}

impl MessageService {
    /// Create a new message service
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Get messages matching the filter
    pub async fn get_messages(&self, filter: &MessageFilter) -> ServiceResult<Vec<Message>> {
        self.store
            .get_messages(filter)
            .await
            .map_err(|e| store_failure("An error occurred while retrieving messages.", &e))
    }

    /// Get the conversation between two users, oldest first
    pub async fn get_conversation(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
    ) -> ServiceResult<Vec<Message>> {
        self.store
            .get_conversation(user_id, other_user_id)
            .await
            .map_err(|e| store_failure("An error occurred while retrieving the conversation.", &e))
    }

    /// Send a direct message
    pub async fn create_message(
        &self,
        sender_id: Uuid,
        new_message: &NewMessage,
    ) -> ServiceResult<Message> {
        validate_message_content(&new_message.content).map_err(ServiceError::Validation)?;
        validate_message_parties(sender_id, new_message.receiver_id)
            .map_err(ServiceError::Validation)?;

        let message = Message::new(
            sender_id,
            new_message.receiver_id,
            new_message.content.clone(),
        );
        self.store
            .create_message(&message)
            .await
            .map_err(|e| store_failure("An error occurred while creating the message.", &e))?;

        Ok(message)
    }

    /// Replace a message's content; senders only
    pub async fn update_message(
        &self,
        message_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> ServiceResult<Message> {
        let public = "An error occurred while updating the message.";

        let mut message = self
            .message_by_id(message_id, public)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Message not found.".to_string()))?;

        if message.sender_id != user_id {
            return Err(ServiceError::Forbidden(
                "You can only update your own messages.".to_string(),
            ));
        }

        validate_message_content(content).map_err(ServiceError::Validation)?;
        message.edit_content(content.to_string());

        self.store
            .update_message(&message)
            .await
            .map_err(|e| store_failure(public, &e))?;

        Ok(message)
    }

    /// Mark the given messages read, where they address the caller and are
    /// still unread; returns the messages actually affected
    pub async fn mark_messages_as_read(
        &self,
        user_id: Uuid,
        message_ids: &[Uuid],
    ) -> ServiceResult<Vec<Message>> {
        let public = "An error occurred while marking the messages as read.";

        let received = self
            .store
            .get_messages(&MessageFilter {
                receiver_id: Some(user_id),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?;

        let mut to_mark: Vec<Message> = received
            .into_iter()
            .filter(|m| message_ids.contains(&m.id) && !m.is_read)
            .collect();
        if to_mark.is_empty() {
            return Err(ServiceError::NotFound(
                "No messages found to mark as read.".to_string(),
            ));
        }

        for message in &mut to_mark {
            message.mark_as_read();
        }
        self.store
            .update_messages(&to_mark)
            .await
            .map_err(|e| store_failure(public, &e))?;

        Ok(to_mark)
    }

    /// Delete a message; senders only
    pub async fn delete_message(&self, message_id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        let public = "An error occurred while deleting the message.";

        let message = self
            .message_by_id(message_id, public)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Message not found.".to_string()))?;

        if message.sender_id != user_id {
            return Err(ServiceError::Forbidden(
                "You can only delete your own messages.".to_string(),
            ));
        }

        self.store
            .delete_message(message_id)
            .await
            .map_err(|e| store_failure(public, &e))
    }

    /// Delete every message between two users, both directions
    pub async fn delete_conversation(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
    ) -> ServiceResult<()> {
        self.store
            .delete_conversation(user_id, other_user_id)
            .await
            .map_err(|e| store_failure("An error occurred while deleting the conversation.", &e))
    }

    async fn message_by_id(
        &self,
        message_id: Uuid,
        public: &str,
    ) -> ServiceResult<Option<Message>> {
        let messages = self
            .store
            .get_messages(&MessageFilter {
                message_id: Some(message_id),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?;
        Ok(messages.into_iter().next())
    }
}
