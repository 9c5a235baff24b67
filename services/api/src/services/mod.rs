//! Business-logic services
//!
//! Each service wraps the shared [`Store`](crate::store::Store) and enforces
//! the authorization rules for one entity family: ownership checks, group
//! role gates, relationship state, and field validation. Store failures are
//! logged here and replaced with generic messages so internal detail never
//! reaches API clients.

use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

pub mod auth;
pub mod comment;
pub mod friendship;
pub mod group;
pub mod group_block;
pub mod group_role;
pub mod like;
pub mod message;
pub mod post;
pub mod token;
pub mod user;
pub mod user_block;

/// Service-layer error, classified for HTTP status mapping
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Input failed a validation rule
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not permitted
    #[error("{0}")]
    Forbidden(String),

    /// Referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Operation conflicts with existing state
    #[error("{0}")]
    Conflict(String),

    /// Unexpected failure, surfaced with a generic message only
    #[error("{0}")]
    Internal(String),
}

/// Type alias for service results
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Log a store failure and replace it with a generic public message
fn store_failure(public: &str, err: &StoreError) -> ServiceError {
    error!(error = %err, "store operation failed");
    ServiceError::Internal(public.to_string())
}

/// Log an unexpected failure and replace it with a generic public message
fn internal_failure(public: &str, err: &anyhow::Error) -> ServiceError {
    error!(error = %err, "service operation failed");
    ServiceError::Internal(public.to_string())
}
