//! Group-scoped block service
//!
//! Blocks inside a group are moderation state, so every operation is gated
//! on the requester holding Manager or Admin in that group.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::GroupBlock;
use crate::store::{GroupBlockFilter, GroupUserRoleFilter, Store};
use crate::validation::validate_block_parties;

use super::{ServiceError, ServiceResult, store_failure};

/// Group block service
#[derive(Clone)]
pub struct GroupBlockService {
    store: Arc<dyn Store>,
}

impl GroupBlockService {
    /// Create a new group block service
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// List blocks in a group; requires Manager or Admin rights
    pub async fn get_group_blocks(
        &self,
        requester_id: Uuid,
        group_id: Uuid,
        block_id: Option<Uuid>,
        blocker_id: Option<Uuid>,
        blocked_id: Option<Uuid>,
    ) -> ServiceResult<Vec<GroupBlock>> {
        let public = "An error occurred while retrieving group blocks.";

        let requester_role = self
            .moderator_role(group_id, requester_id, public)
            .await?
            .ok_or_else(|| {
                ServiceError::Forbidden("You are not member of this group.".to_string())
            })?;
        if !requester_role {
            return Err(ServiceError::Forbidden(
                "You don't have enough rights.".to_string(),
            ));
        }

        self.store
            .get_group_blocks(&GroupBlockFilter {
                group_block_id: block_id,
                group_id: Some(group_id),
                blocker_id,
                blocked_id,
            })
            .await
            .map_err(|e| store_failure(public, &e))
    }

    /// Block a user inside a group; requires Manager or Admin rights
    pub async fn create_group_block(
        &self,
        group_id: Uuid,
        blocker_id: Uuid,
        blocked_id: Uuid,
    ) -> ServiceResult<GroupBlock> {
        let public = "An error occurred while creating the group block.";

        let can_block = self
            .moderator_role(group_id, blocker_id, public)
            .await?
            .unwrap_or(false);
        if !can_block {
            return Err(ServiceError::Forbidden(
                "Only managers, admins or creator can block users in the group.".to_string(),
            ));
        }

        validate_block_parties(blocker_id, blocked_id).map_err(ServiceError::Validation)?;

        let block = GroupBlock::new(blocker_id, blocked_id, group_id);
        self.store
            .create_group_block(&block)
            .await
            .map_err(|e| store_failure(public, &e))?;

        Ok(block)
    }

    /// Remove a group block; requires Manager or Admin rights in its group
    pub async fn delete_group_block(
        &self,
        block_id: Uuid,
        requester_id: Uuid,
    ) -> ServiceResult<()> {
        let public = "An error occurred while deleting the group block.";

        let block = self
            .store
            .get_group_blocks(&GroupBlockFilter {
                group_block_id: Some(block_id),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::NotFound("Group block not found.".to_string()))?;

        let can_delete = self
            .moderator_role(block.group_id, requester_id, public)
            .await?
            .unwrap_or(false);
        if !can_delete {
            return Err(ServiceError::Forbidden(
                "Only managers, admins or creator can delete group blocks.".to_string(),
            ));
        }

        self.store
            .delete_group_block(block_id)
            .await
            .map_err(|e| store_failure(public, &e))
    }

    /// The requester's standing in a group: None when not a member,
    /// otherwise whether their role can moderate.
    async fn moderator_role(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        public: &str,
    ) -> ServiceResult<Option<bool>> {
        let roles = self
            .store
            .get_group_user_roles(&GroupUserRoleFilter {
                group_id: Some(group_id),
                user_id: Some(user_id),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?;
        Ok(roles.into_iter().next().map(|r| r.role.can_moderate()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Group, GroupRole, GroupUserRole, User, UserRole};
    use crate::store::MemoryStore;

    async fn seed_user(store: &Arc<MemoryStore>, name: &str) -> User {
        let user = User::new(
            name.to_string(),
            format!("{name}@example.com"),
            UserRole::User,
            "hash".to_string(),
        );
        store.create_user(&user).await.unwrap();
        user
    }

    async fn seed_member(store: &Arc<MemoryStore>, group: &Group, name: &str, role: GroupRole) -> User {
        let user = seed_user(store, name).await;
        store
            .create_group_user_role(&GroupUserRole::new(user.id, group.id, role))
            .await
            .unwrap();
        user
    }

    async fn setup() -> (Arc<MemoryStore>, GroupBlockService, Group) {
        let store = Arc::new(MemoryStore::new());
        let creator = seed_user(&store, "creator").await;
        let group = Group::new(creator.id, "rustaceans".to_string(), None);
        store.create_group(&group).await.unwrap();
        store
            .create_group_user_role(&GroupUserRole::new(creator.id, group.id, GroupRole::Admin))
            .await
            .unwrap();
        let service = GroupBlockService::new(store.clone());
        (store, service, group)
    }

    #[tokio::test]
    async fn test_blocking_takes_moderator_rights() {
        let (store, service, group) = setup().await;
        let member = seed_member(&store, &group, "member", GroupRole::Member).await;
        let manager = seed_member(&store, &group, "manager", GroupRole::Manager).await;
        let target = seed_member(&store, &group, "target", GroupRole::Member).await;

        let err = service
            .create_group_block(group.id, member.id, target.id)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Forbidden(
                "Only managers, admins or creator can block users in the group.".to_string()
            )
        );

        let block = service
            .create_group_block(group.id, manager.id, target.id)
            .await
            .unwrap();
        assert_eq!(block.blocked_id, target.id);
    }

    #[tokio::test]
    async fn test_blocking_yourself_is_rejected() {
        let (store, service, group) = setup().await;
        let manager = seed_member(&store, &group, "manager", GroupRole::Manager).await;

        let err = service
            .create_group_block(group.id, manager.id, manager.id)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::Validation("BlockedId cannot be the same as BlockerId.".to_string())
        );
    }

    #[tokio::test]
    async fn test_listing_blocks_takes_moderator_rights() {
        let (store, service, group) = setup().await;
        let manager = seed_member(&store, &group, "manager", GroupRole::Manager).await;
        let member = seed_member(&store, &group, "member", GroupRole::Member).await;
        let outsider = seed_user(&store, "outsider").await;
        service
            .create_group_block(group.id, manager.id, member.id)
            .await
            .unwrap();

        let err = service
            .get_group_blocks(outsider.id, group.id, None, None, None)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Forbidden("You are not member of this group.".to_string())
        );

        let err = service
            .get_group_blocks(member.id, group.id, None, None, None)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Forbidden("You don't have enough rights.".to_string())
        );

        let blocks = service
            .get_group_blocks(manager.id, group.id, None, None, None)
            .await
            .unwrap();
        assert_eq!(blocks.len(), 1);
    }

    #[tokio::test]
    async fn test_deleting_blocks_takes_moderator_rights() {
        let (store, service, group) = setup().await;
        let manager = seed_member(&store, &group, "manager", GroupRole::Manager).await;
        let member = seed_member(&store, &group, "member", GroupRole::Member).await;
        let block = service
            .create_group_block(group.id, manager.id, member.id)
            .await
            .unwrap();

        let err = service
            .delete_group_block(block.id, member.id)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Forbidden(
                "Only managers, admins or creator can delete group blocks.".to_string()
            )
        );

        service.delete_group_block(block.id, manager.id).await.unwrap();
        let err = service
            .delete_group_block(block.id, manager.id)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::NotFound("Group block not found.".to_string())
        );
    }
}
