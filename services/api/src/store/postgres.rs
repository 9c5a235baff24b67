//! Postgres store implementation
//!
//! Filters are assembled with `QueryBuilder` so only the populated
//! fields become `AND` clauses. Text search fields (`content`, `name`,
//! `description`) use `ILIKE` substring matching; everything else is an
//! exact match. Constraint violations are classified so callers can
//! tell a duplicate from a broken reference.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::models::{
    Comment, Friendship, Group, GroupBlock, GroupRole, GroupUserRole, Like, Message, Post,
    RefreshToken, User, UserBlock, UserRole,
};

use super::{
    CommentFilter, FriendshipFilter, GroupBlockFilter, GroupFilter, GroupUserRoleFilter,
    LikeFilter, MessageFilter, PostFilter, RefreshTokenFilter, Store, StoreError, StoreResult,
    UserBlockFilter, UserFilter,
};

/// Postgres-backed implementation of the store
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_db_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db) = err {
        let constraint = db.constraint().unwrap_or("unknown").to_string();
        if db.is_unique_violation() {
            return StoreError::UniqueViolation { constraint };
        }
        if db.is_foreign_key_violation() {
            return StoreError::ForeignKeyViolation { constraint };
        }
    }
    StoreError::Database(err)
}

fn like_pattern(value: &str) -> String {
    format!("%{value}%")
}

/// Users carry a typed role column, so rows are mapped by hand instead
/// of through `FromRow`.
fn row_to_user(row: &PgRow) -> StoreResult<User> {
    let role: String = row.get("role");
    let role = role
        .parse::<UserRole>()
        .map_err(|e| StoreError::Database(sqlx::Error::Decode(e.into())))?;
    Ok(User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        role,
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn row_to_group_user_role(row: &PgRow) -> StoreResult<GroupUserRole> {
    let role: String = row.get("role");
    let role = role
        .parse::<GroupRole>()
        .map_err(|e| StoreError::Database(sqlx::Error::Decode(e.into())))?;
    Ok(GroupUserRole {
        id: row.get("id"),
        user_id: row.get("user_id"),
        group_id: row.get("group_id"),
        role,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[async_trait]
impl Store for PostgresStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_user(&self, user: &User) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, role, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }

    async fn get_users(&self, filter: &UserFilter) -> StoreResult<Vec<User>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, username, email, role, password_hash, created_at, updated_at \
             FROM users WHERE 1=1",
        );
        if let Some(id) = filter.user_id {
            qb.push(" AND id = ").push_bind(id);
        }
        if let Some(ref username) = filter.username {
            qb.push(" AND username = ").push_bind(username);
        }
        if let Some(ref email) = filter.email {
            qb.push(" AND email = ").push_bind(email);
        }
        if let Some(role) = filter.role {
            qb.push(" AND role = ").push_bind(role.as_str());
        }
        qb.push(" ORDER BY created_at DESC, id DESC");
        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;
        rows.iter().map(row_to_user).collect()
    }

    async fn update_user(&self, user: &User) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, email = $3, role = $4, password_hash = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(&user.password_hash)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "user",
                id: user.id,
            });
        }
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    async fn create_refresh_token(&self, token: &RefreshToken) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens
                (id, token, user_id, expiry_date, user_agent, ip_address, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(token.id)
        .bind(&token.token)
        .bind(token.user_id)
        .bind(token.expiry_date)
        .bind(&token.user_agent)
        .bind(&token.ip_address)
        .bind(token.created_at)
        .bind(token.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }

    async fn get_refresh_tokens(
        &self,
        filter: &RefreshTokenFilter,
    ) -> StoreResult<Vec<RefreshToken>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, token, user_id, expiry_date, user_agent, ip_address, created_at, \
             updated_at FROM refresh_tokens WHERE 1=1",
        );
        if let Some(user_id) = filter.user_id {
            qb.push(" AND user_id = ").push_bind(user_id);
        }
        if let Some(ref token) = filter.token {
            qb.push(" AND token = ").push_bind(token);
        }
        if let Some(ref user_agent) = filter.user_agent {
            qb.push(" AND user_agent = ").push_bind(user_agent);
        }
        qb.push(" ORDER BY created_at DESC, id DESC");
        qb.build_query_as::<RefreshToken>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn delete_refresh_token(&self, id: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM refresh_tokens WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    async fn create_friendship(&self, friendship: &Friendship) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO friendships
                (id, user1_id, user2_id, requested_by_id, accepted_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(friendship.id)
        .bind(friendship.user1_id)
        .bind(friendship.user2_id)
        .bind(friendship.requested_by_id)
        .bind(friendship.accepted_at)
        .bind(friendship.created_at)
        .bind(friendship.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }

    async fn get_friendships(&self, filter: &FriendshipFilter) -> StoreResult<Vec<Friendship>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, user1_id, user2_id, requested_by_id, accepted_at, created_at, updated_at \
             FROM friendships WHERE 1=1",
        );
        if let Some(id) = filter.friendship_id {
            qb.push(" AND id = ").push_bind(id);
        }
        if let Some(user_id) = filter.user_id {
            qb.push(" AND (user1_id = ")
                .push_bind(user_id)
                .push(" OR user2_id = ")
                .push_bind(user_id)
                .push(")");
        }
        if let Some(accepted) = filter.accepted {
            if accepted {
                qb.push(" AND accepted_at IS NOT NULL");
            } else {
                qb.push(" AND accepted_at IS NULL");
            }
        }
        qb.push(" ORDER BY created_at DESC, id DESC");
        qb.build_query_as::<Friendship>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn friendship_between(&self, a: Uuid, b: Uuid) -> StoreResult<Option<Friendship>> {
        sqlx::query_as::<_, Friendship>(
            r#"
            SELECT id, user1_id, user2_id, requested_by_id, accepted_at, created_at, updated_at
            FROM friendships
            WHERE (user1_id = $1 AND user2_id = $2) OR (user1_id = $2 AND user2_id = $1)
            "#,
        )
        .bind(a)
        .bind(b)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn update_friendship(&self, friendship: &Friendship) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE friendships
            SET accepted_at = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(friendship.id)
        .bind(friendship.accepted_at)
        .bind(friendship.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "friendship",
                id: friendship.id,
            });
        }
        Ok(())
    }

    async fn delete_friendship(&self, id: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM friendships WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    async fn create_user_block(&self, block: &UserBlock) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_blocks (id, blocker_id, blocked_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(block.id)
        .bind(block.blocker_id)
        .bind(block.blocked_id)
        .bind(block.created_at)
        .bind(block.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }

    async fn get_user_blocks(&self, filter: &UserBlockFilter) -> StoreResult<Vec<UserBlock>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, blocker_id, blocked_id, created_at, updated_at \
             FROM user_blocks WHERE 1=1",
        );
        if let Some(id) = filter.block_id {
            qb.push(" AND id = ").push_bind(id);
        }
        if let Some(blocker_id) = filter.blocker_id {
            qb.push(" AND blocker_id = ").push_bind(blocker_id);
        }
        if let Some(blocked_id) = filter.blocked_id {
            qb.push(" AND blocked_id = ").push_bind(blocked_id);
        }
        qb.push(" ORDER BY created_at DESC, id DESC");
        qb.build_query_as::<UserBlock>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn delete_user_block(&self, id: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM user_blocks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    async fn create_group(&self, group: &Group) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO groups (id, creator_id, name, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(group.id)
        .bind(group.creator_id)
        .bind(&group.name)
        .bind(&group.description)
        .bind(group.created_at)
        .bind(group.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }

    async fn get_groups(&self, filter: &GroupFilter) -> StoreResult<Vec<Group>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, creator_id, name, description, created_at, updated_at \
             FROM groups WHERE 1=1",
        );
        if let Some(id) = filter.group_id {
            qb.push(" AND id = ").push_bind(id);
        }
        if let Some(creator_id) = filter.creator_id {
            qb.push(" AND creator_id = ").push_bind(creator_id);
        }
        if let Some(ref name) = filter.name {
            qb.push(" AND name ILIKE ").push_bind(like_pattern(name));
        }
        if let Some(ref description) = filter.description {
            qb.push(" AND description ILIKE ")
                .push_bind(like_pattern(description));
        }
        qb.push(" ORDER BY created_at DESC, id DESC");
        qb.build_query_as::<Group>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn update_group(&self, group: &Group) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE groups
            SET name = $2, description = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(group.id)
        .bind(&group.name)
        .bind(&group.description)
        .bind(group.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "group",
                id: group.id,
            });
        }
        Ok(())
    }

    async fn delete_group(&self, id: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    async fn create_group_user_role(&self, role: &GroupUserRole) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO group_user_roles (id, user_id, group_id, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(role.id)
        .bind(role.user_id)
        .bind(role.group_id)
        .bind(role.role.as_str())
        .bind(role.created_at)
        .bind(role.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }

    async fn get_group_user_roles(
        &self,
        filter: &GroupUserRoleFilter,
    ) -> StoreResult<Vec<GroupUserRole>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, user_id, group_id, role, created_at, updated_at \
             FROM group_user_roles WHERE 1=1",
        );
        if let Some(id) = filter.group_user_role_id {
            qb.push(" AND id = ").push_bind(id);
        }
        if let Some(group_id) = filter.group_id {
            qb.push(" AND group_id = ").push_bind(group_id);
        }
        if let Some(user_id) = filter.user_id {
            qb.push(" AND user_id = ").push_bind(user_id);
        }
        qb.push(" ORDER BY created_at DESC, id DESC");
        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;
        rows.iter().map(row_to_group_user_role).collect()
    }

    async fn update_group_user_role(&self, role: &GroupUserRole) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE group_user_roles
            SET role = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(role.id)
        .bind(role.role.as_str())
        .bind(role.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "group_user_role",
                id: role.id,
            });
        }
        Ok(())
    }

    async fn delete_group_user_role(&self, id: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM group_user_roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    async fn create_group_block(&self, block: &GroupBlock) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO group_blocks (id, blocker_id, blocked_id, group_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(block.id)
        .bind(block.blocker_id)
        .bind(block.blocked_id)
        .bind(block.group_id)
        .bind(block.created_at)
        .bind(block.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }

    async fn get_group_blocks(&self, filter: &GroupBlockFilter) -> StoreResult<Vec<GroupBlock>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, blocker_id, blocked_id, group_id, created_at, updated_at \
             FROM group_blocks WHERE 1=1",
        );
        if let Some(id) = filter.group_block_id {
            qb.push(" AND id = ").push_bind(id);
        }
        if let Some(group_id) = filter.group_id {
            qb.push(" AND group_id = ").push_bind(group_id);
        }
        if let Some(blocker_id) = filter.blocker_id {
            qb.push(" AND blocker_id = ").push_bind(blocker_id);
        }
        if let Some(blocked_id) = filter.blocked_id {
            qb.push(" AND blocked_id = ").push_bind(blocked_id);
        }
        qb.push(" ORDER BY created_at DESC, id DESC");
        qb.build_query_as::<GroupBlock>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn delete_group_block(&self, id: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM group_blocks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    async fn create_post(&self, post: &Post) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, author_id, group_id, content, edited_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(post.id)
        .bind(post.author_id)
        .bind(post.group_id)
        .bind(&post.content)
        .bind(post.edited_at)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }

    async fn get_posts(&self, filter: &PostFilter) -> StoreResult<Vec<Post>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, author_id, group_id, content, edited_at, created_at, updated_at \
             FROM posts WHERE 1=1",
        );
        if let Some(id) = filter.post_id {
            qb.push(" AND id = ").push_bind(id);
        }
        if let Some(author_id) = filter.author_id {
            qb.push(" AND author_id = ").push_bind(author_id);
        }
        if let Some(group_id) = filter.group_id {
            qb.push(" AND group_id = ").push_bind(group_id);
        }
        if let Some(ref content) = filter.content {
            qb.push(" AND content ILIKE ")
                .push_bind(like_pattern(content));
        }
        qb.push(" ORDER BY created_at DESC, id DESC");
        qb.build_query_as::<Post>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn update_post(&self, post: &Post) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET content = $2, edited_at = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(post.id)
        .bind(&post.content)
        .bind(post.edited_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "post",
                id: post.id,
            });
        }
        Ok(())
    }

    async fn delete_post(&self, id: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    async fn create_comment(&self, comment: &Comment) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, author_id, post_id, content, edited_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(comment.id)
        .bind(comment.author_id)
        .bind(comment.post_id)
        .bind(&comment.content)
        .bind(comment.edited_at)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }

    async fn get_comments(&self, filter: &CommentFilter) -> StoreResult<Vec<Comment>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, author_id, post_id, content, edited_at, created_at, updated_at \
             FROM comments WHERE 1=1",
        );
        if let Some(id) = filter.comment_id {
            qb.push(" AND id = ").push_bind(id);
        }
        if let Some(post_id) = filter.post_id {
            qb.push(" AND post_id = ").push_bind(post_id);
        }
        if let Some(author_id) = filter.author_id {
            qb.push(" AND author_id = ").push_bind(author_id);
        }
        if let Some(ref content) = filter.content {
            qb.push(" AND content ILIKE ")
                .push_bind(like_pattern(content));
        }
        qb.push(" ORDER BY created_at DESC, id DESC");
        qb.build_query_as::<Comment>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn update_comment(&self, comment: &Comment) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE comments
            SET content = $2, edited_at = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(comment.id)
        .bind(&comment.content)
        .bind(comment.edited_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "comment",
                id: comment.id,
            });
        }
        Ok(())
    }

    async fn delete_comment(&self, id: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    async fn create_like(&self, like: &Like) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO likes (id, user_id, post_id, comment_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(like.id)
        .bind(like.user_id)
        .bind(like.post_id)
        .bind(like.comment_id)
        .bind(like.created_at)
        .bind(like.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }

    async fn get_likes(&self, filter: &LikeFilter) -> StoreResult<Vec<Like>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, user_id, post_id, comment_id, created_at, updated_at \
             FROM likes WHERE 1=1",
        );
        if let Some(id) = filter.like_id {
            qb.push(" AND id = ").push_bind(id);
        }
        if let Some(user_id) = filter.user_id {
            qb.push(" AND user_id = ").push_bind(user_id);
        }
        if let Some(post_id) = filter.post_id {
            qb.push(" AND post_id = ").push_bind(post_id);
        }
        if let Some(comment_id) = filter.comment_id {
            qb.push(" AND comment_id = ").push_bind(comment_id);
        }
        qb.push(" ORDER BY created_at DESC, id DESC");
        qb.build_query_as::<Like>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn delete_like(&self, id: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM likes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    async fn create_message(&self, message: &Message) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO messages
                (id, sender_id, receiver_id, content, is_read, edited_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(message.id)
        .bind(message.sender_id)
        .bind(message.receiver_id)
        .bind(&message.content)
        .bind(message.is_read)
        .bind(message.edited_at)
        .bind(message.created_at)
        .bind(message.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }

    async fn get_messages(&self, filter: &MessageFilter) -> StoreResult<Vec<Message>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, sender_id, receiver_id, content, is_read, edited_at, created_at, \
             updated_at FROM messages WHERE 1=1",
        );
        if let Some(id) = filter.message_id {
            qb.push(" AND id = ").push_bind(id);
        }
        if let Some(sender_id) = filter.sender_id {
            qb.push(" AND sender_id = ").push_bind(sender_id);
        }
        if let Some(receiver_id) = filter.receiver_id {
            qb.push(" AND receiver_id = ").push_bind(receiver_id);
        }
        qb.push(" ORDER BY created_at DESC, id DESC");
        qb.build_query_as::<Message>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn get_conversation(&self, user_id: Uuid, other_id: Uuid) -> StoreResult<Vec<Message>> {
        sqlx::query_as::<_, Message>(
            r#"
            SELECT id, sender_id, receiver_id, content, is_read, edited_at, created_at, updated_at
            FROM messages
            WHERE (sender_id = $1 AND receiver_id = $2) OR (sender_id = $2 AND receiver_id = $1)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .bind(other_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn update_message(&self, message: &Message) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET content = $2, is_read = $3, edited_at = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(message.id)
        .bind(&message.content)
        .bind(message.is_read)
        .bind(message.edited_at)
        .bind(message.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "message",
                id: message.id,
            });
        }
        Ok(())
    }

    async fn update_messages(&self, messages: &[Message]) -> StoreResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        for message in messages {
            let result = sqlx::query(
                r#"
                UPDATE messages
                SET content = $2, is_read = $3, edited_at = $4, updated_at = $5
                WHERE id = $1
                "#,
            )
            .bind(message.id)
            .bind(&message.content)
            .bind(message.is_read)
            .bind(message.edited_at)
            .bind(message.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound {
                    entity: "message",
                    id: message.id,
                });
            }
        }
        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    async fn delete_message(&self, id: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    async fn delete_conversation(&self, user_id: Uuid, other_id: Uuid) -> StoreResult<()> {
        sqlx::query(
            r#"
            DELETE FROM messages
            WHERE (sender_id = $1 AND receiver_id = $2) OR (sender_id = $2 AND receiver_id = $1)
            "#,
        )
        .bind(user_id)
        .bind(other_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }
}
