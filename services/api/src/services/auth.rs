//! Authentication service
//!
//! Registration, login, and logout. Password hashing uses argon2 with a
//! per-password salt; session state is the stored refresh token.

use std::sync::Arc;

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use tracing::info;
use uuid::Uuid;

use crate::models::{NewUser, UserRole};
use crate::store::{RefreshTokenFilter, Store, UserFilter};

use super::token::{TokenPair, TokenService};
use super::user::UserService;
use super::{ServiceError, ServiceResult, internal_failure, store_failure};

/// Hash a password with argon2 and a fresh salt
pub(crate) fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();
    Ok(password_hash)
}

/// Verify a password against a stored argon2 hash
pub(crate) fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;
    let argon2 = Argon2::default();
    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
    users: UserService,
    tokens: TokenService,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(store: Arc<dyn Store>, users: UserService, tokens: TokenService) -> Self {
        Self {
            store,
            users,
            tokens,
        }
    }

    /// Register a new account and issue its first token pair
    pub async fn register(
        &self,
        new_user: &NewUser,
        user_agent: &str,
        ip_address: &str,
    ) -> ServiceResult<TokenPair> {
        let public = "An error occurred during registration.";
        info!("Registering new user: {}", new_user.username);

        let existing = self
            .store
            .get_users(&UserFilter {
                email: Some(new_user.email.clone()),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?;
        if !existing.is_empty() {
            return Err(ServiceError::Conflict(
                "User with this email already exists.".to_string(),
            ));
        }

        let user = self.users.create_user(new_user, UserRole::User).await?;

        self.tokens
            .generate_tokens(user.id, user_agent, ip_address, false)
            .await
    }

    /// Authenticate by email and password and issue a token pair
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        user_agent: &str,
        ip_address: &str,
    ) -> ServiceResult<TokenPair> {
        let public = "An error occurred during login.";

        let user = self
            .store
            .get_users(&UserFilter {
                email: Some(email.to_string()),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::Unauthorized("Invalid credentials".to_string()))?;

        let valid =
            verify_password(password, &user.password_hash).map_err(|e| internal_failure(public, &e))?;
        if !valid {
            return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
        }

        info!("User logged in: {}", user.id);
        self.tokens
            .generate_tokens(user.id, user_agent, ip_address, false)
            .await
    }

    /// Drop the refresh token held for this user agent, if any
    pub async fn logout(&self, user_id: Uuid, user_agent: &str) -> ServiceResult<()> {
        let public = "An error occurred while logging out.";

        let tokens = self
            .store
            .get_refresh_tokens(&RefreshTokenFilter {
                user_id: Some(user_id),
                user_agent: Some(user_agent.to_string()),
                ..Default::default()
            })
            .await
            .map_err(|e| store_failure(public, &e))?;

        if let Some(token) = tokens.into_iter().next() {
            self.store
                .delete_refresh_token(token.id)
                .await
                .map_err(|e| store_failure(public, &e))?;
        }

        Ok(())
    }
}
