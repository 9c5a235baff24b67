//! Comment service

use std::sync::Arc;

use uuid::Uuid;

use crate::models::{Comment, NewComment};
use crate::store::{CommentFilter, Store};
use crate::validation::validate_comment_content;

use super::{ServiceError, ServiceResult, store_failure};

/// Comment service
#[derive(Clone)]
pub struct CommentService {
    store: Arc<dyn Store>,
}

impl CommentService {
    /// Create a new comment service
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Get comments matching the filter
    pub async fn get_comments(&self, filter: &CommentFilter) -> ServiceResult<Vec<Comment>> {
        self.store
            .get_comments(filter)
            .await
            .map_err(|e| store_failure("An error occurred while retrieving comments.", &e))
    }

    /// Comment on a post
    pub async fn create_comment(
        &self,
        author_id: Uuid,
        new_comment: &NewComment,
    ) -> ServiceResult<Comment> {
        validate_comment_content(&new_comment.content).map_err(ServiceError::Validation)?;

        let comment = Comment::new(author_id, new_comment.post_id, new_comment.content.clone());
        self.store
            .create_comment(&comment)
            .await
            .map_err(|e| store_failure("An error occurred while creating the comment.", &e))?;

        Ok(comment)
    }

    /// Replace a comment's content; authors only
    pub async fn update_comment(
        &self,
        comment_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> ServiceResult<Comment> {
        let public = "An error occurred while updating the comment.";

        let mut comment = self
            .comment_by_id(comment_id, public)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Comment not found.".to_string()))?;

        if comment.author_id != user_id {
            return Err(ServiceError::Forbidden(
                "You can only update your own comments.".to_string(),
            ));
        }

        validate_comment_content(content).map_err(ServiceError::Validation)?;
        comment.edit_content(content.to_string());

        self.store
            .update_comment(&comment)
            .await
            .map_err(|e| store_failure(public, &e))?;

        Ok(comment)
    }

    /// Delete a comment; authors only
    pub async fn delete_comment(&self, comment_id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        let public = "An error occurred while deleting the comment.";

        let comment = self
            .comment_by_id(comment_id, public)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Comment not found.".to_string()))?;

        if comment.author_id != user_id {
            return Err(ServiceError::Forbidden(
                "You can only delete your own comments.".to_string(),
            ));
        }

        self.store
            .delete_comment(comment_id)
            .await
            .map_err(|e| store_failure(public, &e))
    }

    async fn comment_by_id(
        &self,
        comment_id: Uuid,
        public: &str,
    ) -> ServiceResult<Option<Comment>> {
        let comments = self
            .store
            .get_comments(&CommentFilter {
                comment_id: Some(comment_id),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?;
        Ok(comments.into_iter().next())
    }
}
