//! Refresh token management service
//!
//! Issues access/refresh token pairs, reuses live refresh tokens per
//! (user, user agent), and rotates them when little lifetime remains.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::jwt::JwtService;
use crate::models::RefreshToken;
use crate::store::{RefreshTokenFilter, Store, UserFilter};

use super::{ServiceError, ServiceResult, internal_failure, store_failure};

/// Refresh token lifetime in days
const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// Remaining lifetime below which a refresh rotates the token, in days
const ROTATION_THRESHOLD_DAYS: i64 = 1;

/// A signed access token together with its refresh token
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Token management service
#[derive(Clone)]
pub struct TokenService {
    store: Arc<dyn Store>,
    jwt: JwtService,
}

impl TokenService {
    /// Create a new token service
    pub fn new(store: Arc<dyn Store>, jwt: JwtService) -> Self {
        Self { store, jwt }
    }

    /// Issue a token pair for a user and user agent
    ///
    /// An unexpired refresh token for the same (user, user agent) pair is
    /// reused unless `force_rotation` is set; the access token is always
    /// newly signed.
    pub async fn generate_tokens(
        &self,
        user_id: Uuid,
        user_agent: &str,
        ip_address: &str,
        force_rotation: bool,
    ) -> ServiceResult<TokenPair> {
        let public = "An error occurred while generating tokens.";

        let user = self
            .store
            .get_users(&UserFilter {
                user_id: Some(user_id),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::NotFound("User not found.".to_string()))?;

        let existing = self
            .store
            .get_refresh_tokens(&RefreshTokenFilter {
                user_id: Some(user_id),
                user_agent: Some(user_agent.to_string()),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?
            .into_iter()
            .next();

        let now = Utc::now();
        if let Some(existing) = &existing {
            if !force_rotation && !existing.is_expired(now) {
                let access_token = self
                    .jwt
                    .generate_access_token(user.id, user.role)
                    .map_err(|e| internal_failure(public, &e))?;
                return Ok(TokenPair {
                    access_token,
                    refresh_token: existing.token.clone(),
                });
            }
            self.store
                .delete_refresh_token(existing.id)
                .await
                .map_err(|e| store_failure(public, &e))?;
        }

        let access_token = self
            .jwt
            .generate_access_token(user.id, user.role)
            .map_err(|e| internal_failure(public, &e))?;
        let refresh = RefreshToken::new(
            Uuid::new_v4().to_string(),
            user.id,
            now + Duration::days(REFRESH_TOKEN_TTL_DAYS),
            user_agent.to_string(),
            ip_address.to_string(),
        );
        self.store
            .create_refresh_token(&refresh)
            .await
            .map_err(|e| store_failure(public, &e))?;

        Ok(TokenPair {
            access_token,
            refresh_token: refresh.token,
        })
    }

    /// Exchange a refresh token for a fresh access token
    ///
    /// Rotates the refresh token itself when less than a day of its
    /// lifetime remains; expired tokens are deleted and rejected.
    pub async fn refresh_access_token(
        &self,
        refresh_token: &str,
        user_agent: &str,
        ip_address: &str,
    ) -> ServiceResult<TokenPair> {
        let public = "An error occurred while refreshing tokens.";

        let stored = self
            .store
            .get_refresh_tokens(&RefreshTokenFilter {
                token: Some(refresh_token.to_string()),
                user_agent: Some(user_agent.to_string()),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::Unauthorized("Invalid refresh token.".to_string()))?;

        let now = Utc::now();
        if stored.is_expired(now) {
            self.store
                .delete_refresh_token(stored.id)
                .await
                .map_err(|e| store_failure(public, &e))?;
            return Err(ServiceError::Unauthorized(
                "Refresh token has expired.".to_string(),
            ));
        }

        if stored.expiry_date - now < Duration::days(ROTATION_THRESHOLD_DAYS) {
            info!("Rotating refresh token for user: {}", stored.user_id);
            self.store
                .delete_refresh_token(stored.id)
                .await
                .map_err(|e| store_failure(public, &e))?;
            return self
                .generate_tokens(stored.user_id, user_agent, ip_address, true)
                .await;
        }

        let user = self
            .store
            .get_users(&UserFilter {
                user_id: Some(stored.user_id),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::NotFound("User not found.".to_string()))?;

        let access_token = self
            .jwt
            .generate_access_token(user.id, user.role)
            .map_err(|e| internal_failure(public, &e))?;

        Ok(TokenPair {
            access_token,
            refresh_token: stored.token,
        })
    }

    /// Delete every refresh token a user holds
    pub async fn revoke_all_refresh_tokens(&self, user_id: Uuid) -> ServiceResult<()> {
        let public = "An error occurred while revoking all refresh tokens.";

        let tokens = self
            .store
            .get_refresh_tokens(&RefreshTokenFilter {
                user_id: Some(user_id),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?;

        for token in tokens {
            self.store
                .delete_refresh_token(token.id)
                .await
                .map_err(|e| store_failure(public, &e))?;
        }

        Ok(())
    }

    /// Delete the refresh token a user holds for one user agent
    pub async fn revoke_refresh_token_by_user_agent(
        &self,
        user_id: Uuid,
        user_agent: &str,
    ) -> ServiceResult<()> {
        let public = "An error occurred while revoking the refresh token.";

        let token = self
            .store
            .get_refresh_tokens(&RefreshTokenFilter {
                user_id: Some(user_id),
                user_agent: Some(user_agent.to_string()),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?
            .into_iter()
            .next()
            .ok_or_else(|| {
                ServiceError::NotFound(
                    "Refresh token not found for the specified user agent.".to_string(),
                )
            })?;

        self.store
            .delete_refresh_token(token.id)
            .await
            .map_err(|e| store_failure(public, &e))
    }
}
