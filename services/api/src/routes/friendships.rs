//! Friendship routes

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::middleware::AuthUser;
use crate::models::Friendship;
use crate::state::AppState;
use crate::store::FriendshipFilter;

/// Filter parameters for the caller's friendships
#[derive(Debug, Deserialize)]
pub struct FriendshipQuery {
    pub accepted: Option<bool>,
}

/// Friendship request payload
#[derive(Debug, Deserialize)]
pub struct CreateFriendshipRequest {
    pub new_friend_id: Uuid,
}

/// Friendship projection
#[derive(Debug, Serialize)]
pub struct FriendshipResponse {
    pub id: Uuid,
    pub user1_id: Uuid,
    pub user2_id: Uuid,
    pub requested_by_id: Uuid,
    pub is_accepted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Friendship> for FriendshipResponse {
    fn from(friendship: Friendship) -> Self {
        FriendshipResponse {
            id: friendship.id,
            user1_id: friendship.user1_id,
            user2_id: friendship.user2_id,
            requested_by_id: friendship.requested_by_id,
            is_accepted: friendship.is_accepted(),
            created_at: friendship.created_at,
            updated_at: friendship.updated_at,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/friendships",
            get(get_friendships).post(create_friendship),
        )
        .route("/friendships/:friendship_id/accept", put(accept_friendship))
        .route("/friendships/:friendship_id", delete(delete_friendship))
}

/// List the caller's friendships
pub async fn get_friendships(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<FriendshipQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = FriendshipFilter {
        user_id: Some(user.id),
        accepted: query.accepted,
        ..Default::default()
    };

    let friendships = state.friendship_service.get_friendships(&filter).await?;
    let friendships: Vec<FriendshipResponse> = friendships
        .into_iter()
        .map(FriendshipResponse::from)
        .collect();

    Ok(Json(friendships))
}

/// Request a friendship with another user
pub async fn create_friendship(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateFriendshipRequest>,
) -> ApiResult<impl IntoResponse> {
    let friendship = state
        .friendship_service
        .create_friendship(user.id, payload.new_friend_id)
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(FriendshipResponse::from(friendship)),
    ))
}

/// Accept a friendship request addressed to the caller
pub async fn accept_friendship(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(friendship_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let friendship = state
        .friendship_service
        .accept_friendship(friendship_id, user.id)
        .await?;

    Ok(Json(FriendshipResponse::from(friendship)))
}

/// Delete a friendship the caller participates in
pub async fn delete_friendship(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(friendship_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state
        .friendship_service
        .delete_friendship(friendship_id, user.id)
        .await?;

    Ok(Json(json!({"message": "Friendship deleted successfully"})))
}
