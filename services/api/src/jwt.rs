//! JWT service for access token generation and validation
//!
//! Access tokens are signed with the HS256 algorithm using a shared secret.
//! Refresh tokens are opaque values stored server-side (see
//! [`TokenService`](crate::services::token::TokenService)); only access
//! tokens pass through this module.

use anyhow::Result;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::models::UserRole;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared HMAC secret for signing and verifying tokens
    pub secret: String,
    /// Issuer written into and expected from tokens
    pub issuer: String,
    /// Audience written into and expected from tokens
    pub audience: String,
    /// Access token expiration time in seconds (default: 15 minutes)
    pub access_token_expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Shared HMAC secret for signing tokens
    /// - `JWT_ISSUER`: Token issuer (default: "mingle")
    /// - `JWT_AUDIENCE`: Token audience (default: "mingle")
    /// - `JWT_ACCESS_TOKEN_EXPIRY`: Access token expiry in seconds (default: 900)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| "mingle".to_string());
        let audience = std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "mingle".to_string());

        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "900".to_string()) // 15 minutes
            .parse()
            .unwrap_or(900);

        Ok(JwtConfig {
            secret,
            issuer,
            audience,
            access_token_expiry,
        })
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// User role
    pub role: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            config,
        }
    }

    /// Generate an access token for a user
    pub fn generate_access_token(&self, user_id: Uuid, role: UserRole) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let claims = Claims {
            sub: user_id,
            role: role.as_str().to_string(),
            iat: now,
            exp: now + self.config.access_token_expiry,
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        let token = encode(
            &Header::new(jsonwebtoken::Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?;
        Ok(token)
    }

    /// Validate a token and return the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}
