//! Admin group role routes

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
use crate::models::GroupRole;
use crate::routes::admin::ActingUserQuery;
use crate::routes::group_roles::GroupRoleResponse;
use crate::state::AppState;

/// Filter parameters for the member list, read as the given user
#[derive(Debug, Deserialize)]
pub struct AdminGroupRoleQuery {
    pub user_id: Uuid,
    pub group_id: Uuid,
    pub group_user_role_id: Option<Uuid>,
    pub member_id: Option<Uuid>,
}

/// Join payload on behalf of a user
#[derive(Debug, Deserialize)]
pub struct AdminJoinGroupRequest {
    pub group_id: Uuid,
    pub user_id: Uuid,
}

/// Role change payload with an explicit acting user
#[derive(Debug, Deserialize)]
pub struct AdminUpdateGroupRoleRequest {
    pub user_id: Uuid,
    pub role: GroupRole,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/group-roles", get(get_group_roles).post(join_group))
        .route(
            "/group-roles/:group_user_role_id",
            put(update_group_role).delete(delete_group_role),
        )
}

/// List a group's members acting as the given user
pub async fn get_group_roles(
    State(state): State<AppState>,
    Query(query): Query<AdminGroupRoleQuery>,
) -> ApiResult<impl IntoResponse> {
    let roles = state
        .group_role_service
        .get_group_user_roles(
            query.user_id,
            query.group_id,
            query.group_user_role_id,
            query.member_id,
        )
        .await?;
    let roles: Vec<GroupRoleResponse> =
        roles.into_iter().map(GroupRoleResponse::from).collect();

    Ok(Json(roles))
}

/// Add a user to a group as a Member
pub async fn join_group(
    State(state): State<AppState>,
    Json(payload): Json<AdminJoinGroupRequest>,
) -> ApiResult<impl IntoResponse> {
    let role = state
        .group_role_service
        .join_group(payload.group_id, payload.user_id)
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(GroupRoleResponse::from(role)),
    ))
}

/// Change a member's role acting as the given user
pub async fn update_group_role(
    State(state): State<AppState>,
    Path(group_user_role_id): Path<Uuid>,
    Json(payload): Json<AdminUpdateGroupRoleRequest>,
) -> ApiResult<impl IntoResponse> {
    let role = state
        .group_role_service
        .update_group_user_role(group_user_role_id, payload.user_id, payload.role)
        .await?;

    Ok(Json(GroupRoleResponse::from(role)))
}

/// Remove a membership row acting as the given user
pub async fn delete_group_role(
    State(state): State<AppState>,
    Path(group_user_role_id): Path<Uuid>,
    Query(query): Query<ActingUserQuery>,
) -> ApiResult<impl IntoResponse> {
    state
        .group_role_service
        .delete_group_user_role(group_user_role_id, query.user_id)
        .await?;

    Ok(Json(json!({"message": "Group role deleted successfully"})))
}
