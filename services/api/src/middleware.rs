//! Authentication middleware for JWT token validation

use axum::{
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::warn;
use uuid::Uuid;

use crate::{error::ApiError, models::UserRole, state::AppState};

/// Authenticated user information
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: UserRole,
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // Extract the Authorization header
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    // Check if it's a Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    // Validate the token
    let claims = state.jwt.validate_token(token).map_err(|e| {
        warn!("Rejected bearer token: {}", e);
        ApiError::Unauthorized
    })?;

    let role = claims.role.parse::<UserRole>().map_err(|e| {
        warn!("Rejected token with unknown role: {}", e);
        ApiError::Unauthorized
    })?;

    // Insert the authenticated user into the request extensions
    let user = AuthUser {
        id: claims.sub,
        role,
    };
    req.extensions_mut().insert(user);

    // Call the next service
    let response = next.run(req).await;

    Ok(response)
}

/// Admin area gate. Runs after `auth_middleware`, which inserts the
/// `AuthUser` extension this reads.
pub async fn require_admin(
    req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or(ApiError::Unauthorized)?;

    if user.role != UserRole::Admin {
        return Err(ApiError::Forbidden);
    }

    let response = next.run(req).await;

    Ok(response)
}
