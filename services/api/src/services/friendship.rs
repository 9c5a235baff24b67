//! Friendship service
//!
//! Friendships are symmetric once stored; a pair may hold at most one row
//! regardless of which side requested it.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::Friendship;
use crate::store::{FriendshipFilter, Store};

use super::{ServiceError, ServiceResult, store_failure};

/// Friendship service
#[derive(Clone)]
pub struct FriendshipService {
    store: Arc<dyn Store>,
}

impl FriendshipService {
    /// Create a new friendship service
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Get friendships matching the filter
    pub async fn get_friendships(
        &self,
        filter: &FriendshipFilter,
    ) -> ServiceResult<Vec<Friendship>> {
        self.store
            .get_friendships(filter)
            .await
            .map_err(|e| store_failure("An error occurred while retrieving friendships.", &e))
    }

    /// Create a pending friendship request from `requester_id` to `other_id`
    pub async fn create_friendship(
        &self,
        requester_id: Uuid,
        other_id: Uuid,
    ) -> ServiceResult<Friendship> {
        let public = "An error occurred while creating the friendship.";

        if requester_id == other_id {
            return Err(ServiceError::Validation(
                "You cannot befriend yourself.".to_string(),
            ));
        }

        let existing = self
            .store
            .friendship_between(requester_id, other_id)
            .await
            .map_err(|e| store_failure(public, &e))?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(
                "Friendship already exists.".to_string(),
            ));
        }

        let friendship = Friendship::new(requester_id, other_id);
        self.store
            .create_friendship(&friendship)
            .await
            .map_err(|e| store_failure(public, &e))?;

        Ok(friendship)
    }

    /// Accept a pending request; only the recipient may do so
    pub async fn accept_friendship(
        &self,
        friendship_id: Uuid,
        user_id: Uuid,
    ) -> ServiceResult<Friendship> {
        let public = "An error occurred while accepting the friendship.";

        let mut friendship = self
            .friendship_by_id(friendship_id, public)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Friendship not found.".to_string()))?;

        if friendship.user2_id != user_id {
            return Err(ServiceError::Forbidden(
                "Only the recipient can accept the friendship request.".to_string(),
            ));
        }

        friendship.accept().map_err(ServiceError::Conflict)?;

        self.store
            .update_friendship(&friendship)
            .await
            .map_err(|e| store_failure(public, &e))?;

        Ok(friendship)
    }

    /// Delete a friendship; either side may do so
    pub async fn delete_friendship(&self, friendship_id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        let public = "An error occurred while deleting the friendship.";

        let friendship = self
            .friendship_by_id(friendship_id, public)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Friendship not found.".to_string()))?;

        if friendship.user1_id != user_id && friendship.user2_id != user_id {
            return Err(ServiceError::Forbidden(
                "You are not part of this friendship.".to_string(),
            ));
        }

        self.store
            .delete_friendship(friendship_id)
            .await
            .map_err(|e| store_failure(public, &e))
    }

    async fn friendship_by_id(
        &self,
        friendship_id: Uuid,
        public: &str,
    ) -> ServiceResult<Option<Friendship>> {
        let friendships = self
            .store
            .get_friendships(&FriendshipFilter {
                friendship_id: Some(friendship_id),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?;
        Ok(friendships.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{User, UserRole};
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

    fn service(store: &Arc<MemoryStore>) -> FriendshipService {
        FriendshipService::new(store.clone())
    }

    #[tokio::test]
    async fn test_self_friendship_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let alice = seed_user(&store, "alice").await;

        let err = service(&store)
            .create_friendship(alice.id, alice.id)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::Validation("You cannot befriend yourself.".to_string())
        );
    }

    #[tokio::test]
    async fn test_duplicate_friendship_conflicts_in_either_order() {
        let store = Arc::new(MemoryStore::new());
        let alice = seed_user(&store, "alice").await;
        let bob = seed_user(&store, "bob").await;
        let service = service(&store);

        service.create_friendship(alice.id, bob.id).await.unwrap();

        let err = service
            .create_friendship(alice.id, bob.id)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Conflict("Friendship already exists.".to_string())
        );

        let err = service
            .create_friendship(bob.id, alice.id)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Conflict("Friendship already exists.".to_string())
        );
    }

    #[tokio::test]
    async fn test_only_the_recipient_can_accept() {
        let store = Arc::new(MemoryStore::new());
        let alice = seed_user(&store, "alice").await;
        let bob = seed_user(&store, "bob").await;
        let service = service(&store);

        let friendship = service.create_friendship(alice.id, bob.id).await.unwrap();

        let err = service
            .accept_friendship(friendship.id, alice.id)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Forbidden(
                "Only the recipient can accept the friendship request.".to_string()
            )
        );

        let accepted = service
            .accept_friendship(friendship.id, bob.id)
            .await
            .unwrap();
        assert!(accepted.is_accepted());

        let err = service
            .accept_friendship(friendship.id, bob.id)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Conflict("Friendship has already been accepted.".to_string())
        );
    }

    #[tokio::test]
    async fn test_accept_missing_friendship_reports_not_found() {
        let store = Arc::new(MemoryStore::new());
        let alice = seed_user(&store, "alice").await;

        let err = service(&store)
            .accept_friendship(Uuid::new_v4(), alice.id)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::NotFound("Friendship not found.".to_string())
        );
    }

    #[tokio::test]
    async fn test_delete_requires_being_part_of_the_friendship() {
        let store = Arc::new(MemoryStore::new());
        let alice = seed_user(&store, "alice").await;
        let bob = seed_user(&store, "bob").await;
        let carol = seed_user(&store, "carol").await;
        let service = service(&store);

        let friendship = service.create_friendship(alice.id, bob.id).await.unwrap();

        let err = service
            .delete_friendship(friendship.id, carol.id)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Forbidden("You are not part of this friendship.".to_string())
        );

        service
            .delete_friendship(friendship.id, bob.id)
            .await
            .unwrap();
        assert!(
            service
                .get_friendships(&FriendshipFilter {
                    user_id: Some(alice.id),
                    ..Default::default()
                })
                .await
                .unwrap()
                .is_empty()
        );
    }
}
