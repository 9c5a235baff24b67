//! User routes. Reads expose the public projection; mutations only
//! touch the caller's own account.

use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::middleware::AuthUser;
use crate::models::{UpdateUser, User};
use crate::state::AppState;
use crate::store::UserFilter;

/// Filter parameters for user lookup
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: Option<Uuid>,
    pub username: Option<String>,
}

/// Public projection of a user. Email and credentials stay private.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/users",
        get(get_users).put(update_user).delete(delete_user),
    )
}

/// Look up users by id or username
pub async fn get_users(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = UserFilter {
        user_id: query.user_id,
        username: query.username,
        ..Default::default()
    };

    let users = state.user_service.get_users(&filter).await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(users))
}

/// Update the caller's own account
pub async fn update_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateUser>,
) -> ApiResult<impl IntoResponse> {
    let updated = state.user_service.update_user(user.id, &payload).await?;

    Ok(Json(UserResponse::from(updated)))
}

/// Delete the caller's own account
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    state.user_service.delete_user(user.id).await?;

    Ok(Json(json!({"message": "User deleted successfully"})))
}
