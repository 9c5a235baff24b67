//! Admin like routes

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::NewLike;
use crate::routes::admin::ActingUserQuery;
use crate::routes::likes::LikeResponse;
use crate::state::AppState;
use crate::store::LikeFilter;

/// Filter parameters for like lookup across all users
#[derive(Debug, Deserialize)]
pub struct AdminLikeQuery {
    pub like_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub post_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
}

/// Like creation payload with an explicit liker
#[derive(Debug, Deserialize)]
pub struct AdminCreateLikeRequest {
    pub user_id: Uuid,
    pub post_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/likes", get(get_likes).post(create_like))
        .route("/likes/:like_id", delete(delete_like))
}

/// Browse likes for any user
pub async fn get_likes(
    State(state): State<AppState>,
    Query(query): Query<AdminLikeQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = LikeFilter {
        like_id: query.like_id,
        user_id: query.user_id,
        post_id: query.post_id,
        comment_id: query.comment_id,
    };

    let likes = state.like_service.get_likes(&filter).await?;
    let likes: Vec<LikeResponse> = likes.into_iter().map(LikeResponse::from).collect();

    Ok(Json(likes))
}

/// Like a post or comment on behalf of the given user
pub async fn create_like(
    State(state): State<AppState>,
    Json(payload): Json<AdminCreateLikeRequest>,
) -> ApiResult<impl IntoResponse> {
    let new_like = NewLike {
        post_id: payload.post_id,
        comment_id: payload.comment_id,
    };

    let like = state
        .like_service
        .create_like(payload.user_id, &new_like)
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(LikeResponse::from(like)),
    ))
}

/// Remove a like acting as its owner
pub async fn delete_like(
    State(state): State<AppState>,
    Path(like_id): Path<Uuid>,
    Query(query): Query<ActingUserQuery>,
) -> ApiResult<impl IntoResponse> {
    state.like_service.delete_like(like_id, query.user_id).await?;

    Ok(Json(json!({"message": "Like deleted successfully"})))
}
