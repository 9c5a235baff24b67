//! Site-wide user block service

use std::sync::Arc;

use uuid::Uuid;

use crate::models::UserBlock;
use crate::store::{Store, UserBlockFilter};
use crate::validation::validate_block_parties;

use super::{ServiceError, ServiceResult, store_failure};

/// User block service
#[derive(Clone)]
pub struct UserBlockService {
    store: Arc<dyn Store>,
}

impl UserBlockService {
    /// Create a new user block service
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Get user blocks matching the filter
    pub async fn get_user_blocks(&self, filter: &UserBlockFilter) -> ServiceResult<Vec<UserBlock>> {
        self.store
            .get_user_blocks(filter)
            .await
            .map_err(|e| store_failure("An error occurred while retrieving user blocks.", &e))
    }

    /// Block a user site-wide
    pub async fn create_user_block(
        &self,
        blocker_id: Uuid,
        blocked_id: Uuid,
    ) -> ServiceResult<UserBlock> {
        validate_block_parties(blocker_id, blocked_id).map_err(ServiceError::Validation)?;

        let block = UserBlock::new(blocker_id, blocked_id);
        self.store
            .create_user_block(&block)
            .await
            .map_err(|e| store_failure("An error occurred while creating the user block.", &e))?;

        Ok(block)
    }

    /// Remove a block; only its blocker may do so
    pub async fn delete_user_block(&self, block_id: Uuid, requester_id: Uuid) -> ServiceResult<()> {
        let public = "An error occurred while deleting the user block.";

        let block = self
            .store
            .get_user_blocks(&UserBlockFilter {
                block_id: Some(block_id),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::NotFound("User block not found.".to_string()))?;

        if block.blocker_id != requester_id {
            return Err(ServiceError::Forbidden(
                "You can only delete your blocked users.".to_string(),
            ));
        }

        self.store
            .delete_user_block(block_id)
            .await
            .map_err(|e| store_failure(public, &e))
    }
}
