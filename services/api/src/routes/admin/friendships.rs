//! Admin friendship routes

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, put},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::routes::admin::ActingUserQuery;
use crate::routes::friendships::FriendshipResponse;
use crate::state::AppState;
use crate::store::FriendshipFilter;

/// Filter parameters for friendship lookup
#[derive(Debug, Deserialize)]
pub struct AdminFriendshipQuery {
    pub friendship_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub accepted: Option<bool>,
}

/// Friendship creation payload; `user1_id` acts as the requester
#[derive(Debug, Deserialize)]
pub struct AdminCreateFriendshipRequest {
    pub user1_id: Uuid,
    pub user2_id: Uuid,
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

/// List friendships for any user
pub async fn get_friendships(
    State(state): State<AppState>,
    Query(query): Query<AdminFriendshipQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = FriendshipFilter {
        friendship_id: query.friendship_id,
        user_id: query.user_id,
        accepted: query.accepted,
    };

    let friendships = state.friendship_service.get_friendships(&filter).await?;
    let friendships: Vec<FriendshipResponse> = friendships
        .into_iter()
        .map(FriendshipResponse::from)
        .collect();

    Ok(Json(friendships))
}

/// Create a friendship on behalf of `user1_id`
pub async fn create_friendship(
    State(state): State<AppState>,
    Json(payload): Json<AdminCreateFriendshipRequest>,
) -> ApiResult<impl IntoResponse> {
    let friendship = state
        .friendship_service
        .create_friendship(payload.user1_id, payload.user2_id)
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(FriendshipResponse::from(friendship)),
    ))
}

/// Accept a friendship acting as the given recipient
pub async fn accept_friendship(
    State(state): State<AppState>,
    Path(friendship_id): Path<Uuid>,
    Query(query): Query<ActingUserQuery>,
) -> ApiResult<impl IntoResponse> {
    let friendship = state
        .friendship_service
        .accept_friendship(friendship_id, query.user_id)
        .await?;

    Ok(Json(FriendshipResponse::from(friendship)))
}

/// Delete a friendship acting as one of its participants
pub async fn delete_friendship(
    State(state): State<AppState>,
    Path(friendship_id): Path<Uuid>,
    Query(query): Query<ActingUserQuery>,
) -> ApiResult<impl IntoResponse> {
    state
        .friendship_service
        .delete_friendship(friendship_id, query.user_id)
        .await?;

    Ok(Json(json!({"message": "Friendship deleted successfully"})))
}
