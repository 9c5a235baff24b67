//! User block routes. The caller only sees and manages blocks they
//! created.

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
use crate::models::UserBlock;
use crate::state::AppState;
use crate::store::UserBlockFilter;

/// Filter parameters for the caller's blocks
#[derive(Debug, Deserialize)]
pub struct UserBlockQuery {
    pub blocked_id: Option<Uuid>,
}

/// Block creation payload
#[derive(Debug, Deserialize)]
pub struct CreateUserBlockRequest {
    pub blocked_id: Uuid,
}

/// User block projection
#[derive(Debug, Serialize)]
pub struct UserBlockResponse {
    pub id: Uuid,
    pub blocker_id: Uuid,
    pub blocked_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<UserBlock> for UserBlockResponse {
    fn from(block: UserBlock) -> Self {
        UserBlockResponse {
            id: block.id,
            blocker_id: block.blocker_id,
            blocked_id: block.blocked_id,
            created_at: block.created_at,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/user-blocks",
            get(get_user_blocks).post(create_user_block),
        )
        .route("/user-blocks/:block_id", delete(delete_user_block))
}

/// List blocks the caller created
pub async fn get_user_blocks(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<UserBlockQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = UserBlockFilter {
        blocker_id: Some(user.id),
        blocked_id: query.blocked_id,
        ..Default::default()
    };

    let blocks = state.user_block_service.get_user_blocks(&filter).await?;
    let blocks: Vec<UserBlockResponse> =
        blocks.into_iter().map(UserBlockResponse::from).collect();

    Ok(Json(blocks))
}

/// Block another user
pub async fn create_user_block(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateUserBlockRequest>,
) -> ApiResult<impl IntoResponse> {
    let block = state
        .user_block_service
        .create_user_block(user.id, payload.blocked_id)
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(UserBlockResponse::from(block)),
    ))
}

/// Remove a block the caller created
pub async fn delete_user_block(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(block_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state
        .user_block_service
        .delete_user_block(block_id, user.id)
        .await?;

    Ok(Json(json!({"message": "User block deleted successfully"})))
}
