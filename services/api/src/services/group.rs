//! Group service
//!
//! Creating a group also grants its creator the group Admin role. The two
//! writes are not transactional; a failed role grant rolls the group back
//! explicitly.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use crate::models::{Group, GroupRole, GroupUserRole, NewGroup, UpdateGroup};
use crate::store::{GroupFilter, GroupUserRoleFilter, Store};
use crate::validation::validate_group_fields;

use super::{ServiceError, ServiceResult, store_failure};

/// Group service
#[derive(Clone)]
pub struct GroupService {
    store: Arc<dyn Store>,
}

impl GroupService {
    /// Create a new group service
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Get groups matching the filter
    pub async fn get_groups(&self, filter: &GroupFilter) -> ServiceResult<Vec<Group>> {
        self.store
            .get_groups(filter)
            .await
            .map_err(|e| store_failure("An error occurred while retrieving groups.", &e))
    }

    /// Create a group and grant its creator the Admin role
    pub async fn create_group(
        &self,
        creator_id: Uuid,
        new_group: &NewGroup,
    ) -> ServiceResult<Group> {
        let public = "An error occurred while creating the group.";
        info!("Creating new group: {}", new_group.name);

        validate_group_fields(&new_group.name, new_group.description.as_deref())
            .map_err(ServiceError::Validation)?;

        let group = Group::new(
            creator_id,
            new_group.name.clone(),
            new_group.description.clone(),
        );
        self.store
            .create_group(&group)
            .await
            .map_err(|e| store_failure(public, &e))?;

        let role = GroupUserRole::new(creator_id, group.id, GroupRole::Admin);
        if let Err(err) = self.store.create_group_user_role(&role).await {
            // Roll the group back by hand; the store gives no transaction
            // spanning both writes.
            if let Err(cleanup) = self.store.delete_group(group.id).await {
                error!(error = %cleanup, group_id = %group.id, "failed to roll back group creation");
            }
            return Err(store_failure(
                "Failed to assign Admin role to the user.",
                &err,
            ));
        }

        Ok(group)
    }

    /// Update a group's name or description; requires the group Admin role
    pub async fn update_group(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        update: &UpdateGroup,
    ) -> ServiceResult<Group> {
        let public = "An error occurred while updating the group.";

        let mut group = self
            .group_by_id(group_id, public)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Group not found.".to_string()))?;

        self.require_group_admin(
            group_id,
            user_id,
            "You must be an Admin to update this group.",
            public,
        )
        .await?;

        if let Some(name) = &update.name {
            group.name = name.clone();
        }
        if let Some(description) = &update.description {
            group.description = Some(description.clone());
        }
        group.updated_at = Utc::now();

        self.store
            .update_group(&group)
            .await
            .map_err(|e| store_failure(public, &e))?;

        Ok(group)
    }

    /// Delete a group; requires the group Admin role
    pub async fn delete_group(&self, group_id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        let public = "An error occurred while deleting the group.";

        if self.group_by_id(group_id, public).await?.is_none() {
            return Err(ServiceError::NotFound("Group not found.".to_string()));
        }

        self.require_group_admin(
            group_id,
            user_id,
            "You must be an Admin to delete this group.",
            public,
        )
        .await?;

        self.store
            .delete_group(group_id)
            .await
            .map_err(|e| store_failure(public, &e))
    }

    async fn group_by_id(&self, group_id: Uuid, public: &str) -> ServiceResult<Option<Group>> {
        let groups = self
            .store
            .get_groups(&GroupFilter {
                group_id: Some(group_id),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?;
        Ok(groups.into_iter().next())
    }

    async fn require_group_admin(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        denied: &str,
        public: &str,
    ) -> ServiceResult<()> {
        let roles = self
            .store
            .get_group_user_roles(&GroupUserRoleFilter {
                group_id: Some(group_id),
                user_id: Some(user_id),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?;

        if roles.iter().any(|r| r.role == GroupRole::Admin) {
            Ok(())
        } else {
            Err(ServiceError::Forbidden(denied.to_string()))
        }
    }
}
