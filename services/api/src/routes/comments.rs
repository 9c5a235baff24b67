//! Comment routes

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
use crate::models::{Comment, NewComment};
use crate::state::AppState;
use crate::store::CommentFilter;

/// Filter parameters for comment lookup
#[derive(Debug, Deserialize)]
pub struct CommentQuery {
    pub comment_id: Option<Uuid>,
    pub post_id: Option<Uuid>,
    pub author_id: Option<Uuid>,
    pub content: Option<String>,
}

/// Content edit payload
#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}

/// Comment projection
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub edited_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        CommentResponse {
            id: comment.id,
            post_id: comment.post_id,
            author_id: comment.author_id,
            content: comment.content,
            edited_at: comment.edited_at,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/comments", get(get_comments).post(create_comment))
        .route(
            "/comments/:comment_id",
            put(update_comment).delete(delete_comment),
        )
}

/// Browse comments
pub async fn get_comments(
    State(state): State<AppState>,
    Query(query): Query<CommentQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = CommentFilter {
        comment_id: query.comment_id,
        post_id: query.post_id,
        author_id: query.author_id,
        content: query.content,
    };

    let comments = state.comment_service.get_comments(&filter).await?;
    let comments: Vec<CommentResponse> =
        comments.into_iter().map(CommentResponse::from).collect();

    Ok(Json(comments))
}

/// Comment on a post
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewComment>,
) -> ApiResult<impl IntoResponse> {
    let comment = state
        .comment_service
        .create_comment(user.id, &payload)
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(CommentResponse::from(comment)),
    ))
}

/// Edit the caller's own comment
pub async fn update_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(comment_id): Path<Uuid>,
    Json(payload): Json<UpdateCommentRequest>,
) -> ApiResult<impl IntoResponse> {
    let comment = state
        .comment_service
        .update_comment(comment_id, user.id, &payload.content)
        .await?;

    Ok(Json(CommentResponse::from(comment)))
}

/// Delete the caller's own comment
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(comment_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state
        .comment_service
        .delete_comment(comment_id, user.id)
        .await?;

    Ok(Json(json!({"message": "Comment deleted successfully"})))
}
