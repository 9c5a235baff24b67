//! Like service
//!
//! A like targets exactly one post or one comment. Uniqueness per
//! (user, target) is the store's unique index; a second like surfaces as
//! a generic error rather than a dedicated conflict.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::{Like, NewLike};
use crate::store::{LikeFilter, Store};
use crate::validation::validate_like_target;

use super::{ServiceError, ServiceResult, store_failure};

/// Like service
#[derive(Clone)]
pub struct LikeService {
    store: Arc<dyn Store>,
}

impl LikeService {
    /// Create a new like service
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Get likes matching the filter
    pub async fn get_likes(&self, filter: &LikeFilter) -> ServiceResult<Vec<Like>> {
        self.store
            .get_likes(filter)
            .await
            .map_err(|e| store_failure("An error occurred while retrieving likes.", &e))
    }

    /// Like a post or a comment
    pub async fn create_like(&self, user_id: Uuid, new_like: &NewLike) -> ServiceResult<Like> {
        validate_like_target(new_like.post_id, new_like.comment_id)
            .map_err(ServiceError::Validation)?;

        let like = Like::new(user_id, new_like.post_id, new_like.comment_id);
        self.store
            .create_like(&like)
            .await
            .map_err(|e| store_failure("An error occurred while creating the like.", &e))?;

        Ok(like)
    }

    /// Remove a like; only its owner may do so
    pub async fn delete_like(&self, like_id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        let public = "An error occurred while deleting the like.";

        let like = self
            .store
            .get_likes(&LikeFilter {
                like_id: Some(like_id),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::NotFound("Like not found.".to_string()))?;

        if like.user_id != user_id {
            return Err(ServiceError::Forbidden(
                "You can only delete your own likes.".to_string(),
            ));
        }

        self.store
            .delete_like(like_id)
            .await
            .map_err(|e| store_failure(public, &e))
    }
}
