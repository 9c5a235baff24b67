//! Admin group routes

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
use crate::models::{NewGroup, UpdateGroup};
use crate::routes::admin::ActingUserQuery;
use crate::routes::groups::{GroupQuery, GroupResponse};
use crate::state::AppState;
use crate::store::GroupFilter;

/// Group creation payload with an explicit creator
#[derive(Debug, Deserialize)]
pub struct AdminCreateGroupRequest {
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

/// Group update payload with an explicit acting user
#[derive(Debug, Deserialize)]
pub struct AdminUpdateGroupRequest {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
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

/// Create a group on behalf of the given creator
pub async fn create_group(
    State(state): State<AppState>,
    Json(payload): Json<AdminCreateGroupRequest>,
) -> ApiResult<impl IntoResponse> {
    let new_group = NewGroup {
        name: payload.name,
        description: payload.description,
    };

    let group = state
        .group_service
        .create_group(payload.user_id, &new_group)
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(GroupResponse::from(group)),
    ))
}

/// Update a group acting as the given user
pub async fn update_group(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<AdminUpdateGroupRequest>,
) -> ApiResult<impl IntoResponse> {
    let update = UpdateGroup {
        name: payload.name,
        description: payload.description,
    };

    let group = state
        .group_service
        .update_group(group_id, payload.user_id, &update)
        .await?;

    Ok(Json(GroupResponse::from(group)))
}

/// Delete a group acting as the given user
pub async fn delete_group(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    Query(query): Query<ActingUserQuery>,
) -> ApiResult<impl IntoResponse> {
    state
        .group_service
        .delete_group(group_id, query.user_id)
        .await?;

    Ok(Json(json!({"message": "Group deleted successfully"})))
}
