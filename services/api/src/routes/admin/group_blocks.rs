//! Admin group block routes

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
use crate::routes::group_blocks::GroupBlockResponse;
use crate::state::AppState;

/// Filter parameters for a group's blocks, read as the given user
#[derive(Debug, Deserialize)]
pub struct AdminGroupBlockQuery {
    pub user_id: Uuid,
    pub group_id: Uuid,
    pub group_block_id: Option<Uuid>,
    pub blocker_id: Option<Uuid>,
    pub blocked_id: Option<Uuid>,
}

/// Group block creation payload with an explicit blocker
#[derive(Debug, Deserialize)]
pub struct AdminCreateGroupBlockRequest {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub blocked_id: Uuid,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/group-blocks",
            get(get_group_blocks).post(create_group_block),
        )
        .route("/group-blocks/:group_block_id", delete(delete_group_block))
}

/// List blocks in a group acting as the given user
pub async fn get_group_blocks(
    State(state): State<AppState>,
    Query(query): Query<AdminGroupBlockQuery>,
) -> ApiResult<impl IntoResponse> {
    let blocks = state
        .group_block_service
        .get_group_blocks(
            query.user_id,
            query.group_id,
            query.group_block_id,
            query.blocker_id,
            query.blocked_id,
        )
        .await?;
    let blocks: Vec<GroupBlockResponse> =
        blocks.into_iter().map(GroupBlockResponse::from).collect();

    Ok(Json(blocks))
}

/// Block a user in a group on behalf of the given blocker
pub async fn create_group_block(
    State(state): State<AppState>,
    Json(payload): Json<AdminCreateGroupBlockRequest>,
) -> ApiResult<impl IntoResponse> {
    let block = state
        .group_block_service
        .create_group_block(payload.group_id, payload.user_id, payload.blocked_id)
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(GroupBlockResponse::from(block)),
    ))
}

/// Lift a group block acting as the given user
pub async fn delete_group_block(
    State(state): State<AppState>,
    Path(group_block_id): Path<Uuid>,
    Query(query): Query<ActingUserQuery>,
) -> ApiResult<impl IntoResponse> {
    state
        .group_block_service
        .delete_group_block(group_block_id, query.user_id)
        .await?;

    Ok(Json(json!({"message": "Group block deleted successfully"})))
}
