//! Post routes

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::middleware::AuthUser;
use crate::models::{NewPost, Post};
use crate::state::AppState;
use crate::store::PostFilter;

/// Filter parameters for post lookup
#[derive(Debug, Deserialize)]
pub struct PostQuery {
    pub post_id: Option<Uuid>,
    pub author_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub content: Option<String>,
}

/// Content edit payload
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub content: String,
}

/// Post projection
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
    pub content: String,
    pub edited_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        PostResponse {
            id: post.id,
            author_id: post.author_id,
            group_id: post.group_id,
            content: post.content,
            edited_at: post.edited_at,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
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

/// Publish a post, optionally inside a group
pub async fn create_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewPost>,
) -> ApiResult<impl IntoResponse> {
    let post = state.post_service.create_post(user.id, &payload).await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(PostResponse::from(post)),
    ))
}

/// Edit a post the caller may moderate or owns
pub async fn update_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
    Json(payload): Json<UpdatePostRequest>,
) -> ApiResult<impl IntoResponse> {
    let post = state
        .post_service
        .update_post(post_id, user.id, &payload.content)
        .await?;

    Ok(Json(PostResponse::from(post)))
}

/// Delete a post the caller may moderate or owns
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state.post_service.delete_post(post_id, user.id).await?;

    Ok(Json(json!({"message": "Post deleted successfully"})))
}
