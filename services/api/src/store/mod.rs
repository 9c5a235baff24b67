//! Storage abstraction for the Mingle backend
//!
//! One `Store` trait covers every entity with filter-capable reads and
//! plain writes. Rows are inserted exactly as the services built them;
//! the store never generates ids or timestamps. Reads come back newest
//! first except conversations, which are chronological.
//!
//! Two implementations exist: `MemoryStore` for tests and
//! [`PostgresStore`] for production.

#[cfg(test)]
mod memory;
mod postgres;

#[cfg(test)]
pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    Comment, Friendship, Group, GroupBlock, GroupUserRole, Like, Message, Post, RefreshToken,
    User, UserBlock, UserRole,
};

/// Custom error type for store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Target row does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    /// Insert or update would violate a unique constraint
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// Write would violate a foreign key or restrict rule
    #[error("foreign key constraint violated: {constraint}")]
    ForeignKeyViolation { constraint: String },

    /// Underlying database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Type alias for store results
pub type StoreResult<T> = Result<T, StoreError>;

/// Filter for reading users. `username` and `email` are exact matches.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub user_id: Option<Uuid>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
}

/// Filter for reading refresh tokens.
#[derive(Debug, Clone, Default)]
pub struct RefreshTokenFilter {
    pub user_id: Option<Uuid>,
    pub token: Option<String>,
    pub user_agent: Option<String>,
}

/// Filter for reading friendships. `user_id` matches either side of the
/// pair; `accepted` filters on the presence of `accepted_at`.
#[derive(Debug, Clone, Default)]
pub struct FriendshipFilter {
    pub friendship_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub accepted: Option<bool>,
}

/// Filter for reading user blocks.
#[derive(Debug, Clone, Default)]
pub struct UserBlockFilter {
    pub block_id: Option<Uuid>,
    pub blocker_id: Option<Uuid>,
    pub blocked_id: Option<Uuid>,
}

/// Filter for reading groups. `name` and `description` are
/// case-insensitive substring matches.
#[derive(Debug, Clone, Default)]
pub struct GroupFilter {
    pub group_id: Option<Uuid>,
    pub creator_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Filter for reading group membership roles.
#[derive(Debug, Clone, Default)]
pub struct GroupUserRoleFilter {
    pub group_user_role_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

/// Filter for reading group blocks.
#[derive(Debug, Clone, Default)]
pub struct GroupBlockFilter {
    pub group_block_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub blocker_id: Option<Uuid>,
    pub blocked_id: Option<Uuid>,
}

/// Filter for reading posts. `content` is a case-insensitive substring
/// match.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub post_id: Option<Uuid>,
    pub author_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub content: Option<String>,
}

/// Filter for reading comments. `content` is a case-insensitive
/// substring match.
#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    pub comment_id: Option<Uuid>,
    pub post_id: Option<Uuid>,
    pub author_id: Option<Uuid>,
    pub content: Option<String>,
}

/// Filter for reading likes.
#[derive(Debug, Clone, Default)]
pub struct LikeFilter {
    pub like_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub post_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
}

/// Filter for reading messages.
#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    pub message_id: Option<Uuid>,
    pub sender_id: Option<Uuid>,
    pub receiver_id: Option<Uuid>,
}

/// Abstract storage interface for the Mingle entities.
///
/// Implementations must be thread-safe (Send + Sync) and support async
/// operations. Deletes are idempotent; cascades follow the relationship
/// graph described in the schema.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// Cheap liveness probe used by the health endpoint.
    async fn ping(&self) -> StoreResult<()>;

    // User operations

    async fn create_user(&self, user: &User) -> StoreResult<()>;
    async fn get_users(&self, filter: &UserFilter) -> StoreResult<Vec<User>>;
    async fn update_user(&self, user: &User) -> StoreResult<()>;
    /// Deletes a user and cascades to their content, sessions, and
    /// relationship rows. Fails if a group block still references them.
    async fn delete_user(&self, id: Uuid) -> StoreResult<()>;

    // Refresh token operations

    async fn create_refresh_token(&self, token: &RefreshToken) -> StoreResult<()>;
    async fn get_refresh_tokens(
        &self,
        filter: &RefreshTokenFilter,
    ) -> StoreResult<Vec<RefreshToken>>;
    async fn delete_refresh_token(&self, id: Uuid) -> StoreResult<()>;

    // Friendship operations

    async fn create_friendship(&self, friendship: &Friendship) -> StoreResult<()>;
    async fn get_friendships(&self, filter: &FriendshipFilter) -> StoreResult<Vec<Friendship>>;
    /// Looks up the friendship between two users regardless of which
    /// side requested it.
    async fn friendship_between(&self, a: Uuid, b: Uuid) -> StoreResult<Option<Friendship>>;
    async fn update_friendship(&self, friendship: &Friendship) -> StoreResult<()>;
    async fn delete_friendship(&self, id: Uuid) -> StoreResult<()>;

    // User block operations

    async fn create_user_block(&self, block: &UserBlock) -> StoreResult<()>;
    async fn get_user_blocks(&self, filter: &UserBlockFilter) -> StoreResult<Vec<UserBlock>>;
    async fn delete_user_block(&self, id: Uuid) -> StoreResult<()>;

    // Group operations

    async fn create_group(&self, group: &Group) -> StoreResult<()>;
    async fn get_groups(&self, filter: &GroupFilter) -> StoreResult<Vec<Group>>;
    async fn update_group(&self, group: &Group) -> StoreResult<()>;
    async fn delete_group(&self, id: Uuid) -> StoreResult<()>;

    // Group membership role operations

    async fn create_group_user_role(&self, role: &GroupUserRole) -> StoreResult<()>;
    async fn get_group_user_roles(
        &self,
        filter: &GroupUserRoleFilter,
    ) -> StoreResult<Vec<GroupUserRole>>;
    async fn update_group_user_role(&self, role: &GroupUserRole) -> StoreResult<()>;
    async fn delete_group_user_role(&self, id: Uuid) -> StoreResult<()>;

    // Group block operations

    async fn create_group_block(&self, block: &GroupBlock) -> StoreResult<()>;
    async fn get_group_blocks(&self, filter: &GroupBlockFilter) -> StoreResult<Vec<GroupBlock>>;
    async fn delete_group_block(&self, id: Uuid) -> StoreResult<()>;

    // Post operations

    async fn create_post(&self, post: &Post) -> StoreResult<()>;
    async fn get_posts(&self, filter: &PostFilter) -> StoreResult<Vec<Post>>;
    async fn update_post(&self, post: &Post) -> StoreResult<()>;
    async fn delete_post(&self, id: Uuid) -> StoreResult<()>;

    // Comment operations

    async fn create_comment(&self, comment: &Comment) -> StoreResult<()>;
    async fn get_comments(&self, filter: &CommentFilter) -> StoreResult<Vec<Comment>>;
    async fn update_comment(&self, comment: &Comment) -> StoreResult<()>;
    async fn delete_comment(&self, id: Uuid) -> StoreResult<()>;

    // Like operations

    async fn create_like(&self, like: &Like) -> StoreResult<()>;
    async fn get_likes(&self, filter: &LikeFilter) -> StoreResult<Vec<Like>>;
    async fn delete_like(&self, id: Uuid) -> StoreResult<()>;

    // Message operations

    async fn create_message(&self, message: &Message) -> StoreResult<()>;
    async fn get_messages(&self, filter: &MessageFilter) -> StoreResult<Vec<Message>>;
    /// Returns every message between the two users in chronological
    /// ascending order, the one read that is not newest-first.
    async fn get_conversation(&self, user_id: Uuid, other_id: Uuid) -> StoreResult<Vec<Message>>;
    async fn update_message(&self, message: &Message) -> StoreResult<()>;
    /// Persists a batch of edited messages in one call.
    async fn update_messages(&self, messages: &[Message]) -> StoreResult<()>;
    async fn delete_message(&self, id: Uuid) -> StoreResult<()>;
    /// Deletes every message between the two users in either direction.
    async fn delete_conversation(&self, user_id: Uuid, other_id: Uuid) -> StoreResult<()>;
}
