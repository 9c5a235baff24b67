//! Post service
//!
//! Personal posts belong to their author. Posts inside a group are
//! moderator content: creating, editing, and deleting them takes Manager
//! or Admin rights in that group, author or not.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::{NewPost, Post};
use crate::store::{GroupUserRoleFilter, PostFilter, Store};
use crate::validation::validate_post_content;

use super::{ServiceError, ServiceResult, store_failure};

/// Post service
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn Store>,
}

impl PostService {
    /// Create a new post service
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Get posts matching the filter
    pub async fn get_posts(&self, filter: &PostFilter) -> ServiceResult<Vec<Post>> {
        self.store
            .get_posts(filter)
            .await
            .map_err(|e| store_failure("An error occurred while retrieving posts.", &e))
    }

    /// Create a post, optionally inside a group
    pub async fn create_post(&self, author_id: Uuid, new_post: &NewPost) -> ServiceResult<Post> {
        let public = "An error occurred while creating the post.";

        if let Some(group_id) = new_post.group_id {
            if !self.can_moderate(group_id, author_id, public).await? {
                return Err(ServiceError::Forbidden(
                    "Only group admins or managers can create posts in this group.".to_string(),
                ));
            }
        }

        validate_post_content(&new_post.content).map_err(ServiceError::Validation)?;

        let post = Post::new(author_id, new_post.content.clone(), new_post.group_id);
        self.store
            .create_post(&post)
            .await
            .map_err(|e| store_failure(public, &e))?;

        Ok(post)
    }

    /// Replace a post's content
    pub async fn update_post(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> ServiceResult<Post> {
        let public = "An error occurred while updating the post.";

        let mut post = self
            .post_by_id(post_id, public)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Post not found.".to_string()))?;

        if let Some(group_id) = post.group_id {
            if !self.can_moderate(group_id, user_id, public).await? {
                return Err(ServiceError::Forbidden(
                    "Only group admins or managers can update posts in this group.".to_string(),
                ));
            }
        } else if post.author_id != user_id {
            return Err(ServiceError::Forbidden(
                "You can only update your own posts.".to_string(),
            ));
        }

        validate_post_content(content).map_err(ServiceError::Validation)?;
        post.edit_content(content.to_string());

        self.store
            .update_post(&post)
            .await
            .map_err(|e| store_failure(public, &e))?;

        Ok(post)
    }

    /// Delete a post
    pub async fn delete_post(&self, post_id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        let public = "An error occurred while deleting the post.";

        let post = self
            .post_by_id(post_id, public)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Post not found.".to_string()))?;

        if let Some(group_id) = post.group_id {
            if !self.can_moderate(group_id, user_id, public).await? {
                return Err(ServiceError::Forbidden(
                    "Only group admins or managers can delete posts in this group.".to_string(),
                ));
            }
        } else if post.author_id != user_id {
            return Err(ServiceError::Forbidden(
                "You can only delete your own posts.".to_string(),
            ));
        }

        self.store
            .delete_post(post_id)
            .await
            .map_err(|e| store_failure(public, &e))
    }

    async fn post_by_id(&self, post_id: Uuid, public: &str) -> ServiceResult<Option<Post>> {
        let posts = self
            .store
            .get_posts(&PostFilter {
                post_id: Some(post_id),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?;
        Ok(posts.into_iter().next())
    }

    async fn can_moderate(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        public: &str,
    ) -> ServiceResult<bool> {
        let roles = self
            .store
            .get_group_user_roles(&GroupUserRoleFilter {
                group_id: Some(group_id),
                user_id: Some(user_id),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?;
        Ok(roles.first().is_some_and(|r| r.role.can_moderate()))
    }
}
