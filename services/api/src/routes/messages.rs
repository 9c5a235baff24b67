//! Direct message routes. Reads are scoped to messages the caller
//! sent; the conversation view covers both directions.

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::middleware::AuthUser;
use crate::models::{Message, NewMessage};
use crate::state::AppState;
use crate::store::MessageFilter;

/// Filter parameters for the caller's sent messages
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub message_id: Option<Uuid>,
    pub receiver_id: Option<Uuid>,
}

/// Conversation partner parameter
#[derive(Debug, Deserialize)]
pub struct ConversationQuery {
    pub other_user_id: Uuid,
}

/// Content edit payload
#[derive(Debug, Deserialize)]
pub struct UpdateMessageRequest {
    pub content: String,
}

/// Bulk read receipt payload
#[derive(Debug, Deserialize)]
pub struct MarkReadRequest {
    pub message_ids: Vec<Uuid>,
}

/// Message projection
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub is_read: bool,
    pub edited_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        MessageResponse {
            id: message.id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            content: message.content,
            is_read: message.is_read,
            edited_at: message.edited_at,
            created_at: message.created_at,
            updated_at: message.updated_at,
        }
    }
}

fn to_responses(messages: Vec<Message>) -> Vec<MessageResponse> {
    messages.into_iter().map(MessageResponse::from).collect()
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/messages", get(get_messages).post(create_message))
        .route(
            "/messages/conversation",
            get(get_conversation).delete(delete_conversation),
        )
        .route("/messages/read", put(mark_messages_as_read))
        .route(
            "/messages/:message_id",
            put(update_message).delete(delete_message),
        )
}

/// List messages the caller sent
pub async fn get_messages(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<MessageQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = MessageFilter {
        message_id: query.message_id,
        sender_id: Some(user.id),
        receiver_id: query.receiver_id,
    };

    let messages = state.message_service.get_messages(&filter).await?;

    Ok(Json(to_responses(messages)))
}

/// Fetch the two-party conversation in chronological order
pub async fn get_conversation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ConversationQuery>,
) -> ApiResult<impl IntoResponse> {
    let messages = state
        .message_service
        .get_conversation(user.id, query.other_user_id)
        .await?;

    Ok(Json(to_responses(messages)))
}

/// Send a direct message
pub async fn create_message(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewMessage>,
) -> ApiResult<impl IntoResponse> {
    let message = state
        .message_service
        .create_message(user.id, &payload)
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(MessageResponse::from(message)),
    ))
}

/// Edit a message the caller sent
pub async fn update_message(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(message_id): Path<Uuid>,
    Json(payload): Json<UpdateMessageRequest>,
) -> ApiResult<impl IntoResponse> {
    let message = state
        .message_service
        .update_message(message_id, user.id, &payload.content)
        .await?;

    Ok(Json(MessageResponse::from(message)))
}

/// Mark unread messages addressed to the caller as read
pub async fn mark_messages_as_read(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<MarkReadRequest>,
) -> ApiResult<impl IntoResponse> {
    let messages = state
        .message_service
        .mark_messages_as_read(user.id, &payload.message_ids)
        .await?;

    Ok(Json(to_responses(messages)))
}

/// Delete a message the caller sent
pub async fn delete_message(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(message_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state
        .message_service
        .delete_message(message_id, user.id)
        .await?;

    Ok(Json(json!({"message": "Message deleted successfully"})))
}

/// Delete the whole two-party conversation
pub async fn delete_conversation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ConversationQuery>,
) -> ApiResult<impl IntoResponse> {
    state
        .message_service
        .delete_conversation(user.id, query.other_user_id)
        .await?;

    Ok(Json(json!({"message": "Conversation deleted successfully"})))
}
