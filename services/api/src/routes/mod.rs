//! API service routes
//!
//! The user area takes the acting user from the verified bearer token.
//! The admin area sits under `/admin`, requires the `Admin` site role,
//! and passes acting and subject ids explicitly in each request.

use axum::{
    Json, Router,
    extract::State,
    middleware,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use tracing::error;

use crate::error::{ApiError, ApiResult};
use crate::middleware::{auth_middleware, require_admin};
use crate::state::AppState;

mod admin;
mod auth;
mod comments;
mod friendships;
mod group_blocks;
mod group_roles;
mod groups;
mod likes;
mod messages;
mod posts;
mod user_blocks;
mod users;


/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let user_area = Router::new()
        .merge(auth::session_routes())
        .merge(users::routes())
        .merge(friendships::routes())
        .merge(user_blocks::routes())
        .merge(groups::routes())
        .merge(group_roles::routes())
        .merge(group_blocks::routes())
        .merge(posts::routes())
        .merge(comments::routes())
        .merge(likes::routes())
        .merge(messages::routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Layers run outermost-last, so auth populates the extension
    // before the admin gate reads it.
    let admin_area = admin::routes()
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(auth::routes())
        .merge(user_area)
        .nest("/admin", admin_area)
        .with_state(state)
}

/// Health check endpoint with a storage round trip
pub async fn health_check(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    state.store.ping().await.map_err(|e| {
        error!("Health check failed: {}", e);
        ApiError::Internal("Storage is unreachable.".to_string())
    })?;

    Ok(Json(json!({
        "status": "ok",
        "service": "mingle-api"
    })))
}
