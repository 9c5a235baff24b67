//! Admin post routes

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, put},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::NewPost;
use crate::routes::admin::ActingUserQuery;
use crate::routes::posts::{PostQuery, PostResponse};
use crate::state::AppState;
use crate::store::PostFilter;

/// Post creation payload with an explicit author
#[derive(Debug, Deserialize)]
pub struct AdminCreatePostRequest {
    pub user_id: Uuid,
    pub content: String,
    pub group_id: Option<Uuid>,
}

/// Post edit payload with an explicit acting user
#[derive(Debug, Deserialize)]
pub struct AdminUpdatePostRequest {
    pub user_id: Uuid,
    pub content: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(get_posts).post(create_post))
        .route("/posts/:post_id", put(update_post).delete(delete_post))
}

/// Browse posts
pub async fn get_posts(
    State(state): State<AppState>,
    Query(query): Query<PostQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = PostFilter {
        post_id: query.post_id,
        author_id: query.author_id,
        group_id: query.group_id,
        content: query.content,
    };

    let posts = state.post_service.get_posts(&filter).await?;
    let posts: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();

    Ok(Json(posts))
}

/// Publish a post on behalf of the given author
pub async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<AdminCreatePostRequest>,
) -> ApiResult<impl IntoResponse> {
    let new_post = NewPost {
        content: payload.content,
        group_id: payload.group_id,
    };

    let post = state
        .post_service
        .create_post(payload.user_id, &new_post)
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(PostResponse::from(post)),
    ))
}

/// Edit a post acting as the given user
pub async fn update_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Json(payload): Json<AdminUpdatePostRequest>,
) -> ApiResult<impl IntoResponse> {
    let post = state
        .post_service
        .update_post(post_id, payload.user_id, &payload.content)
        .await?;

    Ok(Json(PostResponse::from(post)))
}

/// Delete a post acting as the given user
pub async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Query(query): Query<ActingUserQuery>,
) -> ApiResult<impl IntoResponse> {
    state.post_service.delete_post(post_id, query.user_id).await?;

    Ok(Json(json!({"message": "Post deleted successfully"})))
}
