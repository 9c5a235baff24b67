//! Authentication routes

use std::net::SocketAddr;

use axum::{
    Extension, Json, Router,
    extract::{ConnectInfo, State},
    response::IntoResponse,
    routing::post,
};
use axum_extra::{TypedHeader, headers::UserAgent};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiResult;
use crate::middleware::AuthUser;
use crate::models::NewUser;
use crate::state::AppState;

/// Registration payload
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Refresh payload. The access token may already be expired, so this
/// route sits outside the auth layer and carries the refresh token.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Targeted revocation payload
#[derive(Debug, Deserialize)]
pub struct RevokeAgentRequest {
    pub user_agent: String,
}

/// Routes reachable without a bearer token
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

/// Routes that manage the caller's own sessions
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(logout))
        .route("/auth/revoke", post(revoke_all))
        .route("/auth/revoke-agent", post(revoke_agent))
}

fn agent_string(header: &Option<TypedHeader<UserAgent>>) -> String {
    header
        .as_ref()
        .map(|TypedHeader(agent)| agent.to_string())
        .unwrap_or_default()
}

fn client_ip(addr: &Option<ConnectInfo<SocketAddr>>) -> String {
    addr.as_ref()
        .map(|ConnectInfo(a)| a.ip().to_string())
        .unwrap_or_default()
}

/// Register a new account and issue a token pair
pub async fn register(
    State(state): State<AppState>,
    addr: Option<ConnectInfo<SocketAddr>>,
    user_agent: Option<TypedHeader<UserAgent>>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let new_user = NewUser {
        username: payload.username,
        email: payload.email,
        password: payload.password,
    };

    let tokens = state
        .auth_service
        .register(&new_user, &agent_string(&user_agent), &client_ip(&addr))
        .await?;

    Ok((axum::http::StatusCode::CREATED, Json(tokens)))
}

/// Authenticate and issue a token pair
pub async fn login(
    State(state): State<AppState>,
    addr: Option<ConnectInfo<SocketAddr>>,
    user_agent: Option<TypedHeader<UserAgent>>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let tokens = state
        .auth_service
        .login(
            &payload.email,
            &payload.password,
            &agent_string(&user_agent),
            &client_ip(&addr),
        )
        .await?;

    Ok(Json(tokens))
}

/// Exchange a refresh token for a fresh access token
pub async fn refresh(
    State(state): State<AppState>,
    addr: Option<ConnectInfo<SocketAddr>>,
    user_agent: Option<TypedHeader<UserAgent>>,
    Json(payload): Json<RefreshRequest>,
) -> ApiResult<impl IntoResponse> {
    let tokens = state
        .token_service
        .refresh_access_token(
            &payload.refresh_token,
            &agent_string(&user_agent),
            &client_ip(&addr),
        )
        .await?;

    Ok(Json(tokens))
}

/// Drop the caller's session for the requesting client
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    user_agent: Option<TypedHeader<UserAgent>>,
) -> ApiResult<impl IntoResponse> {
    state
        .auth_service
        .logout(user.id, &agent_string(&user_agent))
        .await?;

    Ok(Json(json!({"message": "Logged out successfully"})))
}

/// Revoke every refresh token the caller holds
pub async fn revoke_all(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    state.token_service.revoke_all_refresh_tokens(user.id).await?;

    Ok(Json(json!({"message": "All sessions revoked"})))
}

/// Revoke the caller's refresh token for one client
pub async fn revoke_agent(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<RevokeAgentRequest>,
) -> ApiResult<impl IntoResponse> {
    state
        .token_service
        .revoke_refresh_token_by_user_agent(user.id, &payload.user_agent)
        .await?;

    Ok(Json(json!({"message": "Session revoked"})))
}
