//! Group routes

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
use crate::models::{Group, NewGroup, UpdateGroup};
use crate::state::AppState;
use crate::store::GroupFilter;

/// Filter parameters for group lookup
#[derive(Debug, Deserialize)]
pub struct GroupQuery {
    pub group_id: Option<Uuid>,
    pub creator_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Group projection
#[derive(Debug, Serialize)]
pub struct GroupResponse {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        GroupResponse {
            id: group.id,
            creator_id: group.creator_id,
            name: group.name,
            description: group.description,
            created_at: group.created_at,
            updated_at: group.updated_at,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/groups", get(get_groups).post(create_group))
        .route(
            "/groups/:group_id",
            put(update_group).delete(delete_group),
        )
}

/// Browse groups
pub async fn get_groups(
    State(state): State<AppState>,
    Query(query): Query<GroupQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = GroupFilter {
        group_id: query.group_id,
        creator_id: query.creator_id,
        name: query.name,
        description: query.description,
    };

    let groups = state.group_service.get_groups(&filter).await?;
    let groups: Vec<GroupResponse> = groups.into_iter().map(GroupResponse::from).collect();

    Ok(Json(groups))
}

/// Create a group with the caller as its Admin
pub async fn create_group(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewGroup>,
) -> ApiResult<impl IntoResponse> {
    let group = state.group_service.create_group(user.id, &payload).await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(GroupResponse::from(group)),
    ))
}

/// Update a group the caller administers
pub async fn update_group(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<UpdateGroup>,
) -> ApiResult<impl IntoResponse> {
    let group = state
        .group_service
        .update_group(group_id, user.id, &payload)
        .await?;

    Ok(Json(GroupResponse::from(group)))
}

/// Delete a group the caller administers
pub async fn delete_group(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(group_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state.group_service.delete_group(group_id, user.id).await?;

    Ok(Json(json!({"message": "Group deleted successfully"})))
}
