//! Group membership and role routes. Joining and listing members hang
//! off the group; role rows are addressed directly for updates.

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
use crate::models::{GroupRole, GroupUserRole};
use crate::state::AppState;

/// Filter parameters for the member list
#[derive(Debug, Deserialize)]
pub struct MemberQuery {
    pub group_user_role_id: Option<Uuid>,
    pub member_id: Option<Uuid>,
}

/// Role change payload
#[derive(Debug, Deserialize)]
pub struct UpdateGroupRoleRequest {
    pub role: GroupRole,
}

/// Group membership projection
#[derive(Debug, Serialize)]
pub struct GroupRoleResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub group_id: Uuid,
    pub role: GroupRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GroupUserRole> for GroupRoleResponse {
    fn from(role: GroupUserRole) -> Self {
        GroupRoleResponse {
            id: role.id,
            user_id: role.user_id,
            group_id: role.group_id,
            role: role.role,
            created_at: role.created_at,
            updated_at: role.updated_at,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/groups/:group_id/members",
            get(get_members).post(join_group),
        )
        .route(
            "/group-roles/:group_user_role_id",
            put(update_group_role).delete(delete_group_role),
        )
}

/// List a group's members; requires Manager or Admin in that group
pub async fn get_members(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(group_id): Path<Uuid>,
    Query(query): Query<MemberQuery>,
) -> ApiResult<impl IntoResponse> {
    let roles = state
        .group_role_service
        .get_group_user_roles(user.id, group_id, query.group_user_role_id, query.member_id)
        .await?;
    let roles: Vec<GroupRoleResponse> =
        roles.into_iter().map(GroupRoleResponse::from).collect();

    Ok(Json(roles))
}

/// Join a group as a Member
pub async fn join_group(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(group_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let role = state.group_role_service.join_group(group_id, user.id).await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(GroupRoleResponse::from(role)),
    ))
}

/// Change a member's role; group Admins only
pub async fn update_group_role(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(group_user_role_id): Path<Uuid>,
    Json(payload): Json<UpdateGroupRoleRequest>,
) -> ApiResult<impl IntoResponse> {
    let role = state
        .group_role_service
        .update_group_user_role(group_user_role_id, user.id, payload.role)
        .await?;

    Ok(Json(GroupRoleResponse::from(role)))
}

/// Leave a group, or remove a member as Manager or Admin
pub async fn delete_group_role(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(group_user_role_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state
        .group_role_service
        .delete_group_user_role(group_user_role_id, user.id)
        .await?;

    Ok(Json(json!({"message": "Group role deleted successfully"})))
}
