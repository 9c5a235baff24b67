//! Group membership and role service
//!
//! A membership row doubles as the permission level. Admin > Manager >
//! Member; listing members takes Manager rights, role changes take Admin,
//! and anyone may delete their own row to leave.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::models::{GroupRole, GroupUserRole};
use crate::store::{GroupUserRoleFilter, Store};

use super::{ServiceError, ServiceResult, store_failure};

/// Group membership and role service
#[derive(Clone)]
pub struct GroupUserRoleService {
    store: Arc<dyn Store>,
}

impl GroupUserRoleService {
    /// Create a new group user role service
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// List membership rows of a group; requires Manager or Admin rights
    pub async fn get_group_user_roles(
        &self,
        requester_id: Uuid,
        group_id: Uuid,
        role_id: Option<Uuid>,
        member_id: Option<Uuid>,
    ) -> ServiceResult<Vec<GroupUserRole>> {
        let public = "An error occurred while retrieving group user roles.";

        let requester_role = self
            .role_in_group(group_id, requester_id, public)
            .await?
            .ok_or_else(|| {
                ServiceError::Forbidden("You are not member of this group.".to_string())
            })?;
        if !requester_role.role.can_moderate() {
            return Err(ServiceError::Forbidden(
                "You don't have enough rights.".to_string(),
            ));
        }

        self.store
            .get_group_user_roles(&GroupUserRoleFilter {
                group_user_role_id: role_id,
                group_id: Some(group_id),
                user_id: member_id,
            })
            .await
            .map_err(|e| store_failure(public, &e))
    }

    /// Join a group as a plain Member
    pub async fn join_group(&self, group_id: Uuid, user_id: Uuid) -> ServiceResult<GroupUserRole> {
        let public = "An error occurred while joining the group.";

        let existing = self.role_in_group(group_id, user_id, public).await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(
                "You are already a member of the group.".to_string(),
            ));
        }

        let role = GroupUserRole::new(user_id, group_id, GroupRole::Member);
        self.store
            .create_group_user_role(&role)
            .await
            .map_err(|e| store_failure(public, &e))?;

        Ok(role)
    }

    /// Change a member's role; Admins only, and never their own demotion
    pub async fn update_group_user_role(
        &self,
        role_id: Uuid,
        requester_id: Uuid,
        new_role: GroupRole,
    ) -> ServiceResult<GroupUserRole> {
        let public = "An error occurred while updating the group user role.";

        let mut target = self
            .role_by_id(role_id, public)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Group user role not found.".to_string()))?;

        let requester_role = self
            .role_in_group(target.group_id, requester_id, public)
            .await?;
        if requester_role.map(|r| r.role) != Some(GroupRole::Admin) {
            return Err(ServiceError::Forbidden(
                "Only Admins can update user roles.".to_string(),
            ));
        }

        if target.user_id == requester_id && new_role != GroupRole::Admin {
            return Err(ServiceError::Forbidden(
                "Admins cannot change their own role to a lower level.".to_string(),
            ));
        }

        target.role = new_role;
        target.updated_at = Utc::now();
        self.store
            .update_group_user_role(&target)
            .await
            .map_err(|e| store_failure(public, &e))?;

        Ok(target)
    }

    /// Delete a membership row: one's own to leave, others' with Manager rights
    pub async fn delete_group_user_role(
        &self,
        role_id: Uuid,
        requester_id: Uuid,
    ) -> ServiceResult<()> {
        let public = "An error occurred while deleting the group user role.";

        let target = self
            .role_by_id(role_id, public)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Group user role not found.".to_string()))?;

        if target.user_id != requester_id {
            let requester_role = self
                .role_in_group(target.group_id, requester_id, public)
                .await?;
            if !requester_role.is_some_and(|r| r.role.can_moderate()) {
                return Err(ServiceError::Forbidden(
                    "Only Managers and Admins can delete other users' group roles.".to_string(),
                ));
            }
        }

        self.store
            .delete_group_user_role(role_id)
            .await
            .map_err(|e| store_failure(public, &e))
    }

    async fn role_by_id(
        &self,
        role_id: Uuid,
        public: &str,
    ) -> ServiceResult<Option<GroupUserRole>> {
        let roles = self
            .store
            .get_group_user_roles(&GroupUserRoleFilter {
                group_user_role_id: Some(role_id),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?;
        Ok(roles.into_iter().next())
    }

    async fn role_in_group(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        public: &str,
    ) -> ServiceResult<Option<GroupUserRole>> {
        let roles = self
            .store
            .get_group_user_roles(&GroupUserRoleFilter {
                group_id: Some(group_id),
                user_id: Some(user_id),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?;
        Ok(roles.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Group, User, UserRole};
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

    /// Seed a group whose creator holds the Admin role, like group creation does.
    async fn setup() -> (Arc<MemoryStore>, GroupUserRoleService, Group, User) {
        let store = Arc::new(MemoryStore::new());
        let admin = seed_user(&store, "admin").await;
        let group = Group::new(admin.id, "rustaceans".to_string(), None);
        store.create_group(&group).await.unwrap();
        store
            .create_group_user_role(&GroupUserRole::new(admin.id, group.id, GroupRole::Admin))
            .await
            .unwrap();
        let service = GroupUserRoleService::new(store.clone());
        (store, service, group, admin)
    }

    #[tokio::test]
    async fn test_joining_twice_conflicts() {
        let (store, service, group, _) = setup().await;
        let bob = seed_user(&store, "bob").await;

        let role = service.join_group(group.id, bob.id).await.unwrap();
        assert_eq!(role.role, GroupRole::Member);

        let err = service.join_group(group.id, bob.id).await.unwrap_err();
        assert_eq!(
            err,
            ServiceError::Conflict("You are already a member of the group.".to_string())
        );
    }

    #[tokio::test]
    async fn test_listing_members_takes_manager_rights() {
        let (store, service, group, admin) = setup().await;
        let bob = seed_user(&store, "bob").await;
        let carol = seed_user(&store, "carol").await;
        service.join_group(group.id, bob.id).await.unwrap();

        let err = service
            .get_group_user_roles(carol.id, group.id, None, None)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Forbidden("You are not member of this group.".to_string())
        );

        let err = service
            .get_group_user_roles(bob.id, group.id, None, None)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Forbidden("You don't have enough rights.".to_string())
        );

        let roles = service
            .get_group_user_roles(admin.id, group.id, None, None)
            .await
            .unwrap();
        assert_eq!(roles.len(), 2);
    }

    #[tokio::test]
    async fn test_only_admins_grant_roles() {
        let (store, service, group, admin) = setup().await;
        let bob = seed_user(&store, "bob").await;
        let carol = seed_user(&store, "carol").await;
        let bob_role = service.join_group(group.id, bob.id).await.unwrap();
        let carol_role = service.join_group(group.id, carol.id).await.unwrap();

        let promoted = service
            .update_group_user_role(bob_role.id, admin.id, GroupRole::Manager)
            .await
            .unwrap();
        assert_eq!(promoted.role, GroupRole::Manager);

        // Managers cannot grant roles, only Admins can.
        let err = service
            .update_group_user_role(carol_role.id, bob.id, GroupRole::Manager)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Forbidden("Only Admins can update user roles.".to_string())
        );
    }

    #[tokio::test]
    async fn test_admins_cannot_demote_themselves() {
        let (store, service, group, admin) = setup().await;
        let admin_role = store
            .get_group_user_roles(&GroupUserRoleFilter {
                group_id: Some(group.id),
                user_id: Some(admin.id),
                ..Default::default()
            })
            .await
            .unwrap()
            .remove(0);

        let err = service
            .update_group_user_role(admin_role.id, admin.id, GroupRole::Member)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::Forbidden(
                "Admins cannot change their own role to a lower level.".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_members_may_leave_but_not_remove_others() {
        let (store, service, group, admin) = setup().await;
        let bob = seed_user(&store, "bob").await;
        let carol = seed_user(&store, "carol").await;
        let bob_role = service.join_group(group.id, bob.id).await.unwrap();
        let carol_role = service.join_group(group.id, carol.id).await.unwrap();

        let err = service
            .delete_group_user_role(carol_role.id, bob.id)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Forbidden(
                "Only Managers and Admins can delete other users' group roles.".to_string()
            )
        );

        // Leaving the group is deleting one's own row.
        service
            .delete_group_user_role(bob_role.id, bob.id)
            .await
            .unwrap();

        // Admins can remove anyone.
        service
            .delete_group_user_role(carol_role.id, admin.id)
            .await
            .unwrap();

        let remaining = service
            .get_group_user_roles(admin.id, group.id, None, None)
            .await
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].user_id, admin.id);
    }
}
