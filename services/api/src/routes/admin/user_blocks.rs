//! Admin user block routes

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
use crate::routes::admin::ActingUserQuery;
use crate::routes::user_blocks::UserBlockResponse;
use crate::state::AppState;
use crate::store::UserBlockFilter;

/// Filter parameters for block lookup
#[derive(Debug, Deserialize)]
pub struct AdminUserBlockQuery {
    pub block_id: Option<Uuid>,
    pub blocker_id: Option<Uuid>,
    pub blocked_id: Option<Uuid>,
}

/// Block creation payload with an explicit blocker
#[derive(Debug, Deserialize)]
pub struct AdminCreateUserBlockRequest {
    pub blocker_id: Uuid,
    pub blocked_id: Uuid,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/user-blocks",
            get(get_user_blocks).post(create_user_block),
        )
        .route("/user-blocks/:block_id", delete(delete_user_block))
}

/// List blocks for any pair of users
pub async fn get_user_blocks(
    State(state): State<AppState>,
    Query(query): Query<AdminUserBlockQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = UserBlockFilter {
        block_id: query.block_id,
        blocker_id: query.blocker_id,
        blocked_id: query.blocked_id,
    };

    let blocks = state.user_block_service.get_user_blocks(&filter).await?;
    let blocks: Vec<UserBlockResponse> =
        blocks.into_iter().map(UserBlockResponse::from).collect();

    Ok(Json(blocks))
}

/// Create a block on behalf of the given blocker
pub async fn create_user_block(
    State(state): State<AppState>,
    Json(payload): Json<AdminCreateUserBlockRequest>,
) -> ApiResult<impl IntoResponse> {
    let block = state
        .user_block_service
        .create_user_block(payload.blocker_id, payload.blocked_id)
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(UserBlockResponse::from(block)),
    ))
}

/// Delete a block acting as its blocker
pub async fn delete_user_block(
    State(state): State<AppState>,
    Path(block_id): Path<Uuid>,
    Query(query): Query<ActingUserQuery>,
) -> ApiResult<impl IntoResponse> {
    state
        .user_block_service
        .delete_user_block(block_id, query.user_id)
        .await?;

    Ok(Json(json!({"message": "User block deleted successfully"})))
}
