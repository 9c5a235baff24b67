//! Like routes. Reads are scoped to the caller's own likes.

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::middleware::AuthUser;
use crate::models::{Like, NewLike};
use crate::state::AppState;
use crate::store::LikeFilter;

/// Filter parameters for the caller's likes
#[derive(Debug, Deserialize)]
pub struct LikeQuery {
    pub like_id: Option<Uuid>,
    pub post_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
}

/// Like projection
#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Like> for LikeResponse {
    fn from(like: Like) -> Self {
        LikeResponse {
            id: like.id,
            user_id: like.user_id,
            post_id: like.post_id,
            comment_id: like.comment_id,
            created_at: like.created_at,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/likes", get(get_likes).post(create_like))
        .route("/likes/:like_id", delete(delete_like))
}

/// List the caller's likes
pub async fn get_likes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<LikeQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = LikeFilter {
        like_id: query.like_id,
        user_id: Some(user.id),
        post_id: query.post_id,
        comment_id: query.comment_id,
    };

    let likes = state.like_service.get_likes(&filter).await?;
    let likes: Vec<LikeResponse> = likes.into_iter().map(LikeResponse::from).collect();

    Ok(Json(likes))
}

/// Like a post or a comment
pub async fn create_like(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewLike>,
) -> ApiResult<impl IntoResponse> {
    let like = state.like_service.create_like(user.id, &payload).await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(LikeResponse::from(like)),
    ))
}

/// Remove the caller's own like
pub async fn delete_like(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(like_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state.like_service.delete_like(like_id, user.id).await?;

    Ok(Json(json!({"message": "Like deleted successfully"})))
}
