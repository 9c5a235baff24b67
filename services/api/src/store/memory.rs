//! In-memory store implementation
//!
//! Keeps every table in a `HashMap` behind one `RwLock` so that
//! cascading deletes observe a consistent snapshot. Mirrors the
//! Postgres schema: the same unique constraints, foreign keys, and
//! cascade edges are enforced by hand here so service tests behave the
//! same against either backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    Comment, Friendship, Group, GroupBlock, GroupUserRole, Like, Message, Post, RefreshToken,
    User, UserBlock,
};

use super::{
    CommentFilter, FriendshipFilter, GroupBlockFilter, GroupFilter, GroupUserRoleFilter,
    LikeFilter, MessageFilter, PostFilter, RefreshTokenFilter, Store, StoreError, StoreResult,
    UserBlockFilter, UserFilter,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    refresh_tokens: HashMap<Uuid, RefreshToken>,
    friendships: HashMap<Uuid, Friendship>,
    user_blocks: HashMap<Uuid, UserBlock>,
    groups: HashMap<Uuid, Group>,
    group_user_roles: HashMap<Uuid, GroupUserRole>,
    group_blocks: HashMap<Uuid, GroupBlock>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
    likes: HashMap<Uuid, Like>,
    messages: HashMap<Uuid, Message>,
}

impl Tables {
    fn require_user(&self, id: Uuid, constraint: &str) -> StoreResult<()> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::ForeignKeyViolation {
                constraint: constraint.to_string(),
            })
        }
    }

    fn require_group(&self, id: Uuid, constraint: &str) -> StoreResult<()> {
        if self.groups.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::ForeignKeyViolation {
                constraint: constraint.to_string(),
            })
        }
    }

    /// Removes a comment together with the likes attached to it.
    fn drop_comment(&mut self, id: Uuid) {
        self.comments.remove(&id);
        self.likes.retain(|_, l| l.comment_id != Some(id));
    }

    /// Removes a post together with its comments and likes.
    fn drop_post(&mut self, id: Uuid) {
        self.posts.remove(&id);
        let comment_ids: Vec<Uuid> = self
            .comments
            .values()
            .filter(|c| c.post_id == id)
            .map(|c| c.id)
            .collect();
        for comment_id in comment_ids {
            self.drop_comment(comment_id);
        }
        self.likes.retain(|_, l| l.post_id != Some(id));
    }

    /// Removes a group together with its roles, blocks, and posts.
    fn drop_group(&mut self, id: Uuid) {
        self.groups.remove(&id);
        self.group_user_roles.retain(|_, r| r.group_id != id);
        self.group_blocks.retain(|_, b| b.group_id != id);
        let post_ids: Vec<Uuid> = self
            .posts
            .values()
            .filter(|p| p.group_id == Some(id))
            .map(|p| p.id)
            .collect();
        for post_id in post_ids {
            self.drop_post(post_id);
        }
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// In-memory implementation of the store, used in tests
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_user(&self, user: &User) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(&user.id) {
            return Err(StoreError::UniqueViolation {
                constraint: "users_pkey".to_string(),
            });
        }
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::UniqueViolation {
                constraint: "users_username_idx".to_string(),
            });
        }
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::UniqueViolation {
                constraint: "users_email_idx".to_string(),
            });
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn get_users(&self, filter: &UserFilter) -> StoreResult<Vec<User>> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables
            .users
            .values()
            .filter(|u| {
                filter.user_id.is_none_or(|id| u.id == id)
                    && filter.username.as_deref().is_none_or(|n| u.username == n)
                    && filter.email.as_deref().is_none_or(|e| u.email == e)
                    && filter.role.is_none_or(|r| u.role == r)
            })
            .cloned()
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(users)
    }

    async fn update_user(&self, user: &User) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|u| u.id != user.id && u.username == user.username)
        {
            return Err(StoreError::UniqueViolation {
                constraint: "users_username_idx".to_string(),
            });
        }
        if tables
            .users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(StoreError::UniqueViolation {
                constraint: "users_email_idx".to_string(),
            });
        }
        match tables.users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                entity: "user",
                id: user.id,
            }),
        }
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        // Group blocks restrict user deletion, same as the schema.
        if tables
            .group_blocks
            .values()
            .any(|b| b.blocker_id == id || b.blocked_id == id)
        {
            return Err(StoreError::ForeignKeyViolation {
                constraint: "group_blocks_blocker_id_fkey".to_string(),
            });
        }
        if tables.users.remove(&id).is_none() {
            return Ok(());
        }
        tables.refresh_tokens.retain(|_, t| t.user_id != id);
        tables
            .friendships
            .retain(|_, f| f.user1_id != id && f.user2_id != id && f.requested_by_id != id);
        tables
            .user_blocks
            .retain(|_, b| b.blocker_id != id && b.blocked_id != id);
        tables.group_user_roles.retain(|_, r| r.user_id != id);
        tables
            .messages
            .retain(|_, m| m.sender_id != id && m.receiver_id != id);
        let like_ids: Vec<Uuid> = tables
            .likes
            .values()
            .filter(|l| l.user_id == id)
            .map(|l| l.id)
            .collect();
        for like_id in like_ids {
            tables.likes.remove(&like_id);
        }
        let comment_ids: Vec<Uuid> = tables
            .comments
            .values()
            .filter(|c| c.author_id == id)
            .map(|c| c.id)
            .collect();
        for comment_id in comment_ids {
            tables.drop_comment(comment_id);
        }
        let post_ids: Vec<Uuid> = tables
            .posts
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        for post_id in post_ids {
            tables.drop_post(post_id);
        }
        let group_ids: Vec<Uuid> = tables
            .groups
            .values()
            .filter(|g| g.creator_id == id)
            .map(|g| g.id)
            .collect();
        for group_id in group_ids {
            tables.drop_group(group_id);
        }
        Ok(())
    }

    async fn create_refresh_token(&self, token: &RefreshToken) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.require_user(token.user_id, "refresh_tokens_user_id_fkey")?;
        let duplicate = tables
            .refresh_tokens
            .values()
            .any(|t| t.user_id == token.user_id && t.user_agent == token.user_agent);
        if duplicate {
            return Err(StoreError::UniqueViolation {
                constraint: "refresh_tokens_user_agent_idx".to_string(),
            });
        }
        tables.refresh_tokens.insert(token.id, token.clone());
        Ok(())
    }

    async fn get_refresh_tokens(
        &self,
        filter: &RefreshTokenFilter,
    ) -> StoreResult<Vec<RefreshToken>> {
        let tables = self.tables.read().await;
        let mut tokens: Vec<RefreshToken> = tables
            .refresh_tokens
            .values()
            .filter(|t| {
                filter.user_id.is_none_or(|id| t.user_id == id)
                    && filter.token.as_deref().is_none_or(|v| t.token == v)
                    && filter
                        .user_agent
                        .as_deref()
                        .is_none_or(|ua| t.user_agent == ua)
            })
            .cloned()
            .collect();
        tokens.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(tokens)
    }

    async fn delete_refresh_token(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.refresh_tokens.remove(&id);
        Ok(())
    }

    async fn create_friendship(&self, friendship: &Friendship) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.require_user(friendship.user1_id, "friendships_user1_id_fkey")?;
        tables.require_user(friendship.user2_id, "friendships_user2_id_fkey")?;
        tables.require_user(friendship.requested_by_id, "friendships_requested_by_id_fkey")?;
        if tables
            .friendships
            .values()
            .any(|f| f.user1_id == friendship.user1_id && f.user2_id == friendship.user2_id)
        {
            return Err(StoreError::UniqueViolation {
                constraint: "friendships_user1_id_user2_id_idx".to_string(),
            });
        }
        tables.friendships.insert(friendship.id, friendship.clone());
        Ok(())
    }

    async fn get_friendships(&self, filter: &FriendshipFilter) -> StoreResult<Vec<Friendship>> {
        let tables = self.tables.read().await;
        let mut friendships: Vec<Friendship> = tables
            .friendships
            .values()
            .filter(|f| {
                filter.friendship_id.is_none_or(|id| f.id == id)
                    && filter
                        .user_id
                        .is_none_or(|id| f.user1_id == id || f.user2_id == id)
                    && filter.accepted.is_none_or(|a| f.is_accepted() == a)
            })
            .cloned()
            .collect();
        friendships.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(friendships)
    }

    async fn friendship_between(&self, a: Uuid, b: Uuid) -> StoreResult<Option<Friendship>> {
        let tables = self.tables.read().await;
        Ok(tables
            .friendships
            .values()
            .find(|f| {
                (f.user1_id == a && f.user2_id == b) || (f.user1_id == b && f.user2_id == a)
            })
            .cloned())
    }

    async fn update_friendship(&self, friendship: &Friendship) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        match tables.friendships.get_mut(&friendship.id) {
            Some(existing) => {
                *existing = friendship.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                entity: "friendship",
                id: friendship.id,
            }),
        }
    }

    async fn delete_friendship(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.friendships.remove(&id);
        Ok(())
    }

    async fn create_user_block(&self, block: &UserBlock) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.require_user(block.blocker_id, "user_blocks_blocker_id_fkey")?;
        tables.require_user(block.blocked_id, "user_blocks_blocked_id_fkey")?;
        if tables
            .user_blocks
            .values()
            .any(|b| b.blocker_id == block.blocker_id && b.blocked_id == block.blocked_id)
        {
            return Err(StoreError::UniqueViolation {
                constraint: "user_blocks_blocker_id_blocked_id_idx".to_string(),
            });
        }
        tables.user_blocks.insert(block.id, block.clone());
        Ok(())
    }

    async fn get_user_blocks(&self, filter: &UserBlockFilter) -> StoreResult<Vec<UserBlock>> {
        let tables = self.tables.read().await;
        let mut blocks: Vec<UserBlock> = tables
            .user_blocks
            .values()
            .filter(|b| {
                filter.block_id.is_none_or(|id| b.id == id)
                    && filter.blocker_id.is_none_or(|id| b.blocker_id == id)
                    && filter.blocked_id.is_none_or(|id| b.blocked_id == id)
            })
            .cloned()
            .collect();
        blocks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(blocks)
    }

    async fn delete_user_block(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.user_blocks.remove(&id);
        Ok(())
    }

    async fn create_group(&self, group: &Group) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.require_user(group.creator_id, "groups_creator_id_fkey")?;
        tables.groups.insert(group.id, group.clone());
        Ok(())
    }

    async fn get_groups(&self, filter: &GroupFilter) -> StoreResult<Vec<Group>> {
        let tables = self.tables.read().await;
        let mut groups: Vec<Group> = tables
            .groups
            .values()
            .filter(|g| {
                filter.group_id.is_none_or(|id| g.id == id)
                    && filter.creator_id.is_none_or(|id| g.creator_id == id)
                    && filter
                        .name
                        .as_deref()
                        .is_none_or(|n| contains_ci(&g.name, n))
                    && filter.description.as_deref().is_none_or(|d| {
                        g.description.as_deref().is_some_and(|gd| contains_ci(gd, d))
                    })
            })
            .cloned()
            .collect();
        groups.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(groups)
    }

    async fn update_group(&self, group: &Group) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        match tables.groups.get_mut(&group.id) {
            Some(existing) => {
                *existing = group.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                entity: "group",
                id: group.id,
            }),
        }
    }

    async fn delete_group(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.groups.contains_key(&id) {
            tables.drop_group(id);
        }
        Ok(())
    }

    async fn create_group_user_role(&self, role: &GroupUserRole) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.require_user(role.user_id, "group_user_roles_user_id_fkey")?;
        tables.require_group(role.group_id, "group_user_roles_group_id_fkey")?;
        if tables
            .group_user_roles
            .values()
            .any(|r| r.user_id == role.user_id && r.group_id == role.group_id)
        {
            return Err(StoreError::UniqueViolation {
                constraint: "group_user_roles_user_id_group_id_idx".to_string(),
            });
        }
        tables.group_user_roles.insert(role.id, role.clone());
        Ok(())
    }

    async fn get_group_user_roles(
        &self,
        filter: &GroupUserRoleFilter,
    ) -> StoreResult<Vec<GroupUserRole>> {
        let tables = self.tables.read().await;
        let mut roles: Vec<GroupUserRole> = tables
            .group_user_roles
            .values()
            .filter(|r| {
                filter.group_user_role_id.is_none_or(|id| r.id == id)
                    && filter.group_id.is_none_or(|id| r.group_id == id)
                    && filter.user_id.is_none_or(|id| r.user_id == id)
            })
            .cloned()
            .collect();
        roles.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(roles)
    }

    async fn update_group_user_role(&self, role: &GroupUserRole) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        match tables.group_user_roles.get_mut(&role.id) {
            Some(existing) => {
                *existing = role.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                entity: "group_user_role",
                id: role.id,
            }),
        }
    }

    async fn delete_group_user_role(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.group_user_roles.remove(&id);
        Ok(())
    }

    async fn create_group_block(&self, block: &GroupBlock) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.require_user(block.blocker_id, "group_blocks_blocker_id_fkey")?;
        tables.require_user(block.blocked_id, "group_blocks_blocked_id_fkey")?;
        tables.require_group(block.group_id, "group_blocks_group_id_fkey")?;
        if tables.group_blocks.values().any(|b| {
            b.blocker_id == block.blocker_id
                && b.blocked_id == block.blocked_id
                && b.group_id == block.group_id
        }) {
            return Err(StoreError::UniqueViolation {
                constraint: "group_blocks_blocker_id_blocked_id_group_id_idx".to_string(),
            });
        }
        tables.group_blocks.insert(block.id, block.clone());
        Ok(())
    }

    async fn get_group_blocks(&self, filter: &GroupBlockFilter) -> StoreResult<Vec<GroupBlock>> {
        let tables = self.tables.read().await;
        let mut blocks: Vec<GroupBlock> = tables
            .group_blocks
            .values()
            .filter(|b| {
                filter.group_block_id.is_none_or(|id| b.id == id)
                    && filter.group_id.is_none_or(|id| b.group_id == id)
                    && filter.blocker_id.is_none_or(|id| b.blocker_id == id)
                    && filter.blocked_id.is_none_or(|id| b.blocked_id == id)
            })
            .cloned()
            .collect();
        blocks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(blocks)
    }

    async fn delete_group_block(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.group_blocks.remove(&id);
        Ok(())
    }

    async fn create_post(&self, post: &Post) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.require_user(post.author_id, "posts_author_id_fkey")?;
        if let Some(group_id) = post.group_id {
            tables.require_group(group_id, "posts_group_id_fkey")?;
        }
        tables.posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn get_posts(&self, filter: &PostFilter) -> StoreResult<Vec<Post>> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|p| {
                filter.post_id.is_none_or(|id| p.id == id)
                    && filter.author_id.is_none_or(|id| p.author_id == id)
                    && filter.group_id.is_none_or(|id| p.group_id == Some(id))
                    && filter
                        .content
                        .as_deref()
                        .is_none_or(|c| contains_ci(&p.content, c))
            })
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(posts)
    }

    async fn update_post(&self, post: &Post) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        match tables.posts.get_mut(&post.id) {
            Some(existing) => {
                *existing = post.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                entity: "post",
                id: post.id,
            }),
        }
    }

    async fn delete_post(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.posts.contains_key(&id) {
            tables.drop_post(id);
        }
        Ok(())
    }

    async fn create_comment(&self, comment: &Comment) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.require_user(comment.author_id, "comments_author_id_fkey")?;
        if !tables.posts.contains_key(&comment.post_id) {
            return Err(StoreError::ForeignKeyViolation {
                constraint: "comments_post_id_fkey".to_string(),
            });
        }
        tables.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn get_comments(&self, filter: &CommentFilter) -> StoreResult<Vec<Comment>> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| {
                filter.comment_id.is_none_or(|id| c.id == id)
                    && filter.post_id.is_none_or(|id| c.post_id == id)
                    && filter.author_id.is_none_or(|id| c.author_id == id)
                    && filter
                        .content
                        .as_deref()
                        .is_none_or(|v| contains_ci(&c.content, v))
            })
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(comments)
    }

    async fn update_comment(&self, comment: &Comment) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        match tables.comments.get_mut(&comment.id) {
            Some(existing) => {
                *existing = comment.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                entity: "comment",
                id: comment.id,
            }),
        }
    }

    async fn delete_comment(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.comments.contains_key(&id) {
            tables.drop_comment(id);
        }
        Ok(())
    }

    async fn create_like(&self, like: &Like) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.require_user(like.user_id, "likes_user_id_fkey")?;
        if let Some(post_id) = like.post_id {
            if !tables.posts.contains_key(&post_id) {
                return Err(StoreError::ForeignKeyViolation {
                    constraint: "likes_post_id_fkey".to_string(),
                });
            }
        }
        if let Some(comment_id) = like.comment_id {
            if !tables.comments.contains_key(&comment_id) {
                return Err(StoreError::ForeignKeyViolation {
                    constraint: "likes_comment_id_fkey".to_string(),
                });
            }
        }
        // The unique index treats NULLs as equal, so a second like on
        // the same target always collides.
        if tables.likes.values().any(|l| {
            l.user_id == like.user_id
                && l.post_id == like.post_id
                && l.comment_id == like.comment_id
        }) {
            return Err(StoreError::UniqueViolation {
                constraint: "likes_user_id_post_id_comment_id_idx".to_string(),
            });
        }
        tables.likes.insert(like.id, like.clone());
        Ok(())
    }

    async fn get_likes(&self, filter: &LikeFilter) -> StoreResult<Vec<Like>> {
        let tables = self.tables.read().await;
        let mut likes: Vec<Like> = tables
            .likes
            .values()
            .filter(|l| {
                filter.like_id.is_none_or(|id| l.id == id)
                    && filter.user_id.is_none_or(|id| l.user_id == id)
                    && filter.post_id.is_none_or(|id| l.post_id == Some(id))
                    && filter.comment_id.is_none_or(|id| l.comment_id == Some(id))
            })
            .cloned()
            .collect();
        likes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(likes)
    }

    async fn delete_like(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.likes.remove(&id);
        Ok(())
    }

    async fn create_message(&self, message: &Message) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.require_user(message.sender_id, "messages_sender_id_fkey")?;
        tables.require_user(message.receiver_id, "messages_receiver_id_fkey")?;
        tables.messages.insert(message.id, message.clone());
        Ok(())
    }

    async fn get_messages(&self, filter: &MessageFilter) -> StoreResult<Vec<Message>> {
        let tables = self.tables.read().await;
        let mut messages: Vec<Message> = tables
            .messages
            .values()
            .filter(|m| {
                filter.message_id.is_none_or(|id| m.id == id)
                    && filter.sender_id.is_none_or(|id| m.sender_id == id)
                    && filter.receiver_id.is_none_or(|id| m.receiver_id == id)
            })
            .cloned()
            .collect();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(messages)
    }

    async fn get_conversation(&self, user_id: Uuid, other_id: Uuid) -> StoreResult<Vec<Message>> {
        let tables = self.tables.read().await;
        let mut messages: Vec<Message> = tables
            .messages
            .values()
            .filter(|m| {
                (m.sender_id == user_id && m.receiver_id == other_id)
                    || (m.sender_id == other_id && m.receiver_id == user_id)
            })
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(messages)
    }

    async fn update_message(&self, message: &Message) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        match tables.messages.get_mut(&message.id) {
            Some(existing) => {
                *existing = message.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                entity: "message",
                id: message.id,
            }),
        }
    }

    async fn update_messages(&self, messages: &[Message]) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        for message in messages {
            match tables.messages.get_mut(&message.id) {
                Some(existing) => *existing = message.clone(),
                None => {
                    return Err(StoreError::NotFound {
                        entity: "message",
                        id: message.id,
                    });
                }
            }
        }
        Ok(())
    }

    async fn delete_message(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.messages.remove(&id);
        Ok(())
    }

    async fn delete_conversation(&self, user_id: Uuid, other_id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.messages.retain(|_, m| {
            !((m.sender_id == user_id && m.receiver_id == other_id)
                || (m.sender_id == other_id && m.receiver_id == user_id))
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    fn sample_user(name: &str) -> User {
        User::new(
            name.to_string(),
            format!("{name}@example.com"),
            UserRole::User,
            "hash".to_string(),
        )
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = MemoryStore::new();
        let alice = sample_user("alice");
        store.create_user(&alice).await.unwrap();

        let mut clone = sample_user("alice2");
        clone.email = alice.email.clone();
        let err = store.create_user(&clone).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_username_filter_is_exact_and_content_filter_is_substring() {
        let store = MemoryStore::new();
        let alice = sample_user("alice");
        store.create_user(&alice).await.unwrap();

        let exact = store
            .get_users(&UserFilter {
                username: Some("alice".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(exact.len(), 1);

        let partial = store
            .get_users(&UserFilter {
                username: Some("ali".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(partial.is_empty());

        let post = Post::new(alice.id, "Hello Rustaceans".to_string(), None);
        store.create_post(&post).await.unwrap();

        let found = store
            .get_posts(&PostFilter {
                content: Some("rustace".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_deleting_a_user_cascades_through_their_content() {
        let store = MemoryStore::new();
        let alice = sample_user("alice");
        let bob = sample_user("bob");
        store.create_user(&alice).await.unwrap();
        store.create_user(&bob).await.unwrap();

        let group = Group::new(alice.id, "book club".to_string(), None);
        store.create_group(&group).await.unwrap();
        let post = Post::new(alice.id, "first".to_string(), Some(group.id));
        store.create_post(&post).await.unwrap();
        let comment = Comment::new(bob.id, post.id, "nice".to_string());
        store.create_comment(&comment).await.unwrap();
        let like = Like::new(bob.id, Some(post.id), None);
        store.create_like(&like).await.unwrap();
        let message = Message::new(bob.id, alice.id, "hey".to_string());
        store.create_message(&message).await.unwrap();
        let friendship = Friendship::new(bob.id, alice.id);
        store.create_friendship(&friendship).await.unwrap();

        store.delete_user(alice.id).await.unwrap();

        assert!(store.get_groups(&Default::default()).await.unwrap().is_empty());
        assert!(store.get_posts(&Default::default()).await.unwrap().is_empty());
        assert!(store.get_comments(&Default::default()).await.unwrap().is_empty());
        assert!(store.get_likes(&Default::default()).await.unwrap().is_empty());
        assert!(store.get_messages(&Default::default()).await.unwrap().is_empty());
        assert!(store
            .get_friendships(&Default::default())
            .await
            .unwrap()
            .is_empty());
        // Bob is untouched.
        assert_eq!(store.get_users(&Default::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_group_blocks_prevent_user_deletion() {
        let store = MemoryStore::new();
        let alice = sample_user("alice");
        let bob = sample_user("bob");
        store.create_user(&alice).await.unwrap();
        store.create_user(&bob).await.unwrap();
        let group = Group::new(alice.id, "club".to_string(), None);
        store.create_group(&group).await.unwrap();
        let block = GroupBlock::new(alice.id, bob.id, group.id);
        store.create_group_block(&block).await.unwrap();

        let err = store.delete_user(bob.id).await.unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation { .. }));

        store.delete_group_block(block.id).await.unwrap();
        store.delete_user(bob.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_conversation_is_chronological_both_ways() {
        let store = MemoryStore::new();
        let alice = sample_user("alice");
        let bob = sample_user("bob");
        store.create_user(&alice).await.unwrap();
        store.create_user(&bob).await.unwrap();

        let mut first = Message::new(alice.id, bob.id, "one".to_string());
        first.created_at = first.created_at - chrono::Duration::seconds(10);
        let second = Message::new(bob.id, alice.id, "two".to_string());
        store.create_message(&second).await.unwrap();
        store.create_message(&first).await.unwrap();

        let conversation = store.get_conversation(alice.id, bob.id).await.unwrap();
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation[0].content, "one");
        assert_eq!(conversation[1].content, "two");

        store.delete_conversation(bob.id, alice.id).await.unwrap();
        assert!(store.get_messages(&Default::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_a_target_can_only_be_liked_once() {
        let store = MemoryStore::new();
        let alice = sample_user("alice");
        store.create_user(&alice).await.unwrap();
        let post = Post::new(alice.id, "hello".to_string(), None);
        store.create_post(&post).await.unwrap();

        let like = Like::new(alice.id, Some(post.id), None);
        store.create_like(&like).await.unwrap();
        let again = Like::new(alice.id, Some(post.id), None);
        let err = store.create_like(&again).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { .. }));
    }
}
