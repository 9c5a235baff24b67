//! Admin comment routes

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
use crate::models::NewComment;
use crate::routes::admin::ActingUserQuery;
use crate::routes::comments::{CommentQuery, CommentResponse};
use crate::state::AppState;
use crate::store::CommentFilter;

/// Comment creation payload with an explicit author
#[derive(Debug, Deserialize)]
pub struct AdminCreateCommentRequest {
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub content: String,
}

/// Comment edit payload with an explicit acting user
#[derive(Debug, Deserialize)]
pub struct AdminUpdateCommentRequest {
    pub user_id: Uuid,
    pub content: String,
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

/// Comment on a post on behalf of the given author
pub async fn create_comment(
    State(state): State<AppState>,
    Json(payload): Json<AdminCreateCommentRequest>,
) -> ApiResult<impl IntoResponse> {
    let new_comment = NewComment {
        post_id: payload.post_id,
        content: payload.content,
    };

    let comment = state
        .comment_service
        .create_comment(payload.user_id, &new_comment)
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(CommentResponse::from(comment)),
    ))
}

/// Edit a comment acting as the given user
pub async fn update_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<Uuid>,
    Json(payload): Json<AdminUpdateCommentRequest>,
) -> ApiResult<impl IntoResponse> {
    let comment = state
        .comment_service
        .update_comment(comment_id, payload.user_id, &payload.content)
        .await?;

    Ok(Json(CommentResponse::from(comment)))
}

/// Delete a comment acting as the given user
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<Uuid>,
    Query(query): Query<ActingUserQuery>,
) -> ApiResult<impl IntoResponse> {
    state
        .comment_service
        .delete_comment(comment_id, query.user_id)
        .await?;

    Ok(Json(json!({"message": "Comment deleted successfully"})))
}
