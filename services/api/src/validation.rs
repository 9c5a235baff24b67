//! Input validation utilities
//!
//! Pure field checks applied before any store access. Each entity has an
//! explicit `validate_*` function; there is no rule engine.

use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;

use crate::models::{NewUser, UpdateUser};

/// Maximum username length
pub const MAX_USERNAME_LENGTH: usize = 100;
/// Maximum email length
pub const MAX_EMAIL_LENGTH: usize = 255;
/// Maximum direct message content length
pub const MAX_MESSAGE_CONTENT_LENGTH: usize = 500;
/// Maximum group name length
pub const MAX_GROUP_NAME_LENGTH: usize = 255;
/// Maximum group description length
pub const MAX_GROUP_DESCRIPTION_LENGTH: usize = 500;
/// Maximum post content length
pub const MAX_POST_CONTENT_LENGTH: usize = 5000;
/// Maximum comment content length
pub const MAX_COMMENT_CONTENT_LENGTH: usize = 500;

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username cannot be empty.".to_string());
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(format!(
            "Username cannot exceed {} characters.",
            MAX_USERNAME_LENGTH
        ));
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err("Username can only contain letters, numbers, and underscores.".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty.".to_string());
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(format!(
            "Email cannot exceed {} characters.",
            MAX_EMAIL_LENGTH
        ));
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Email must be a valid email address.".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password cannot be empty.".to_string());
    }

    if password.len() < 8 {
        return Err("Password must be at least 8 characters long.".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err("Password must contain at least one letter.".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one digit.".to_string());
    }

    Ok(())
}

/// Validate a registration payload
pub fn validate_new_user(new_user: &NewUser) -> Result<(), String> {
    validate_username(&new_user.username)?;
    validate_email(&new_user.email)?;
    validate_password(&new_user.password)?;
    Ok(())
}

/// Validate a partial user update; absent fields are skipped
pub fn validate_update_user(update: &UpdateUser) -> Result<(), String> {
    if let Some(username) = &update.username {
        validate_username(username)?;
    }
    if let Some(email) = &update.email {
        validate_email(email)?;
    }
    if let Some(password) = &update.password {
        validate_password(password)?;
    }
    Ok(())
}

/// Validate post content
pub fn validate_post_content(content: &str) -> Result<(), String> {
    if content.is_empty() {
        return Err("Content cannot be empty.".to_string());
    }

    if content.len() > MAX_POST_CONTENT_LENGTH {
        return Err(format!(
            "Content cannot exceed {} characters.",
            MAX_POST_CONTENT_LENGTH
        ));
    }

    Ok(())
}

/// Validate comment content
pub fn validate_comment_content(content: &str) -> Result<(), String> {
    if content.is_empty() {
        return Err("Content cannot be empty.".to_string());
    }

    if content.len() > MAX_COMMENT_CONTENT_LENGTH {
        return Err(format!(
            "Content cannot exceed {} characters.",
            MAX_COMMENT_CONTENT_LENGTH
        ));
    }

    Ok(())
}

/// Validate message content
pub fn validate_message_content(content: &str) -> Result<(), String> {
    if content.is_empty() {
        return Err("Content cannot be empty.".to_string());
    }

    if content.len() > MAX_MESSAGE_CONTENT_LENGTH {
        return Err(format!(
            "Content cannot exceed {} characters.",
            MAX_MESSAGE_CONTENT_LENGTH
        ));
    }

    Ok(())
}

/// Validate message participants
pub fn validate_message_parties(sender_id: Uuid, receiver_id: Uuid) -> Result<(), String> {
    if sender_id == receiver_id {
        return Err("ReceiverId cannot be the same as SenderId.".to_string());
    }
    Ok(())
}

/// Validate group name and description
pub fn validate_group_fields(name: &str, description: Option<&str>) -> Result<(), String> {
    if name.is_empty() {
        return Err("Name cannot be empty.".to_string());
    }

    if name.len() > MAX_GROUP_NAME_LENGTH {
        return Err(format!(
            "Name cannot exceed {} characters.",
            MAX_GROUP_NAME_LENGTH
        ));
    }

    if let Some(description) = description
        && description.len() > MAX_GROUP_DESCRIPTION_LENGTH
    {
        return Err(format!(
            "Description cannot exceed {} characters.",
            MAX_GROUP_DESCRIPTION_LENGTH
        ));
    }

    Ok(())
}

/// Validate block participants, site-wide or group-scoped
pub fn validate_block_parties(blocker_id: Uuid, blocked_id: Uuid) -> Result<(), String> {
    if blocker_id == blocked_id {
        return Err("BlockedId cannot be the same as BlockerId.".to_string());
    }
    Ok(())
}

/// Validate a like target: exactly one of post or comment
pub fn validate_like_target(post_id: Option<Uuid>, comment_id: Option<Uuid>) -> Result<(), String> {
    if post_id.is_some() == comment_id.is_some() {
        return Err("Either PostId or CommentId must be set, but not both.".to_string());
    }
    Ok(())
}
