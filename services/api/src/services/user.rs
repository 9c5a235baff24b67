//! User management service

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::models::{NewUser, UpdateUser, User, UserRole};
use crate::store::{Store, UserFilter};
use crate::validation::{validate_new_user, validate_update_user};

use super::auth::hash_password;
use super::{ServiceError, ServiceResult, internal_failure, store_failure};

/// User management service
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn Store>,
}

impl UserService {
    /// Create a new user service
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Get users matching the filter
    pub async fn get_users(&self, filter: &UserFilter) -> ServiceResult<Vec<User>> {
        self.store
            .get_users(filter)
            .await
            .map_err(|e| store_failure("An error occurred while retrieving users.", &e))
    }

    /// Create a user with the given role, hashing the password
    pub async fn create_user(&self, new_user: &NewUser, role: UserRole) -> ServiceResult<User> {
        info!("Creating new user: {}", new_user.username);

        let by_email = self
            .store
            .get_users(&UserFilter {
                email: Some(new_user.email.clone()),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure("An error occurred while creating the user.", &e))?;
        if !by_email.is_empty() {
            return Err(ServiceError::Conflict(
                "An account with this email already exists.".to_string(),
            ));
        }

        let by_username = self
            .store
            .get_users(&UserFilter {
                username: Some(new_user.username.clone()),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure("An error occurred while creating the user.", &e))?;
        if !by_username.is_empty() {
            return Err(ServiceError::Conflict(
                "An account with this username already exists.".to_string(),
            ));
        }

        validate_new_user(new_user).map_err(ServiceError::Validation)?;

        let password_hash = hash_password(&new_user.password)
            .map_err(|e| internal_failure("An error occurred while creating the user.", &e))?;

        let user = User::new(
            new_user.username.clone(),
            new_user.email.clone(),
            role,
            password_hash,
        );
        self.store
            .create_user(&user)
            .await
            .map_err(|e| store_failure("An error occurred while creating the user.", &e))?;

        Ok(user)
    }

    /// Update a user's username, email or password
    pub async fn update_user(&self, user_id: Uuid, update: &UpdateUser) -> ServiceResult<User> {
        let public = "An error occurred while updating the user.";

        let mut user = self
            .user_by_id(user_id, public)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found.".to_string()))?;

        if let Some(email) = &update.email {
            if email != &user.email {
                let existing = self
                    .store
                    .get_users(&UserFilter {
                        email: Some(email.clone()),
                        ..Default::default()
                    })
                    .await
                    .map_err(|e| store_failure(public, &e))?;
                if existing.iter().any(|u| u.id != user_id) {
                    return Err(ServiceError::Conflict(
                        "An account with this email already exists.".to_string(),
                    ));
                }
            }
        }

        validate_update_user(update).map_err(ServiceError::Validation)?;

        if let Some(username) = &update.username {
            user.username = username.clone();
        }
        if let Some(email) = &update.email {
            user.email = email.clone();
        }
        if let Some(password) = &update.password {
            user.password_hash =
                hash_password(password).map_err(|e| internal_failure(public, &e))?;
        }
        user.updated_at = Utc::now();

        self.store
            .update_user(&user)
            .await
            .map_err(|e| store_failure(public, &e))?;

        Ok(user)
    }

    /// Delete a user and, through the store, all content they own
    pub async fn delete_user(&self, user_id: Uuid) -> ServiceResult<()> {
        let public = "An error occurred while deleting the user.";

        if self.user_by_id(user_id, public).await?.is_none() {
            return Err(ServiceError::NotFound("User not found.".to_string()));
        }

        self.store
            .delete_user(user_id)
            .await
            .map_err(|e| store_failure(public, &e))
    }

    async fn user_by_id(&self, user_id: Uuid, public: &str) -> ServiceResult<Option<User>> {
        let users = self
            .store
            .get_users(&UserFilter {
                user_id: Some(user_id),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?;
        Ok(users.into_iter().next())
    }
}
