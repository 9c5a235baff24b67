//! Admin user routes. These expose contact details and can create
//! accounts with any site role.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::{NewUser, UpdateUser, User, UserRole};
use crate::state::AppState;
use crate::store::UserFilter;

/// Filter parameters for administrative user lookup
#[derive(Debug, Deserialize)]
pub struct AdminUserQuery {
    pub user_id: Option<Uuid>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
}

/// Account creation payload with an explicit site role
#[derive(Debug, Deserialize)]
pub struct AdminCreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Administrative projection including contact details
#[derive(Debug, Serialize)]
pub struct AdminUserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for AdminUserResponse {
    fn from(user: User) -> Self {
        AdminUserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Full row projection; exposes the stored credential hash
#[derive(Debug, Serialize)]
pub struct AdminUserFullResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for AdminUserFullResponse {
    fn from(user: User) -> Self {
        AdminUserFullResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            password_hash: user.password_hash,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(get_users).post(create_user))
        .route("/users/full", get(get_users_full))
        .route("/users/:user_id", put(update_user).delete(delete_user))
}

fn admin_filter(query: AdminUserQuery) -> UserFilter {
    UserFilter {
        user_id: query.user_id,
        username: query.username,
        email: query.email,
        role: query.role,
    }
}

/// List users with the administrative projection
pub async fn get_users(
    State(state): State<AppState>,
    Query(query): Query<AdminUserQuery>,
) -> ApiResult<impl IntoResponse> {
    let users = state.user_service.get_users(&admin_filter(query)).await?;
    let users: Vec<AdminUserResponse> =
        users.into_iter().map(AdminUserResponse::from).collect();

    Ok(Json(users))
}

/// List users with full rows, credential hash included
pub async fn get_users_full(
    State(state): State<AppState>,
    Query(query): Query<AdminUserQuery>,
) -> ApiResult<impl IntoResponse> {
    let users = state.user_service.get_users(&admin_filter(query)).await?;
    let users: Vec<AdminUserFullResponse> =
        users.into_iter().map(AdminUserFullResponse::from).collect();

    Ok(Json(users))
}

/// Create an account with the given site role
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<AdminCreateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    let new_user = NewUser {
        username: payload.username,
        email: payload.email,
        password: payload.password,
    };

    let user = state.user_service.create_user(&new_user, payload.role).await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(AdminUserResponse::from(user)),
    ))
}

/// Update any account
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateUser>,
) -> ApiResult<impl IntoResponse> {
    let user = state.user_service.update_user(user_id, &payload).await?;

    Ok(Json(AdminUserResponse::from(user)))
}

/// Delete any account
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state.user_service.delete_user(user_id).await?;

    Ok(Json(json!({"message": "User deleted successfully"})))
}
