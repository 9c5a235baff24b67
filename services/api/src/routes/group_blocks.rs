//! Group block routes. Every operation is gated on the caller's role
//! inside the group.

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
use crate::models::GroupBlock;
use crate::state::AppState;

/// Filter parameters for a group's blocks
#[derive(Debug, Deserialize)]
pub struct GroupBlockQuery {
    pub group_id: Uuid,
    pub group_block_id: Option<Uuid>,
    pub blocker_id: Option<Uuid>,
    pub blocked_id: Option<Uuid>,
}

/// Group block creation payload
#[derive(Debug, Deserialize)]
pub struct CreateGroupBlockRequest {
    pub group_id: Uuid,
    pub blocked_id: Uuid,
}

/// Group block projection
#[derive(Debug, Serialize)]
pub struct GroupBlockResponse {
    pub id: Uuid,
    pub group_id: Uuid,
    pub blocker_id: Uuid,
    pub blocked_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<GroupBlock> for GroupBlockResponse {
    fn from(block: GroupBlock) -> Self {
        GroupBlockResponse {
            id: block.id,
            group_id: block.group_id,
            blocker_id: block.blocker_id,
            blocked_id: block.blocked_id,
            created_at: block.created_at,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/group-blocks",
            get(get_group_blocks).post(create_group_block),
        )
        .route("/group-blocks/:group_block_id", delete(delete_group_block))
}

/// List blocks in a group; requires Manager or Admin there
pub async fn get_group_blocks(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<GroupBlockQuery>,
) -> ApiResult<impl IntoResponse> {
    let blocks = state
        .group_block_service
        .get_group_blocks(
            user.id,
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

/// Block a user inside a group
pub async fn create_group_block(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateGroupBlockRequest>,
) -> ApiResult<impl IntoResponse> {
    let block = state
        .group_block_service
        .create_group_block(payload.group_id, user.id, payload.blocked_id)
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(GroupBlockResponse::from(block)),
    ))
}

/// Lift a block inside a group
pub async fn delete_group_block(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(group_block_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state
        .group_block_service
        .delete_group_block(group_block_id, user.id)
        .await?;

    Ok(Json(json!({"message": "Group block deleted successfully"})))
}
