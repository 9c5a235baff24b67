//! Admin message routes

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, put},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::{Message, NewMessage};
use crate::routes::admin::ActingUserQuery;
use crate::routes::messages::MessageResponse;
use crate::state::AppState;
use crate::store::MessageFilter;

/// Filter parameters for message lookup across all users
#[derive(Debug, Deserialize)]
pub struct AdminMessageQuery {
    pub message_id: Option<Uuid>,
    pub sender_id: Option<Uuid>,
    pub receiver_id: Option<Uuid>,
}

/// Conversation parameters between two explicit users
#[derive(Debug, Deserialize)]
pub struct AdminConversationQuery {
    pub user_id: Uuid,
    pub other_user_id: Uuid,
}

/// Message creation payload with an explicit sender
#[derive(Debug, Deserialize)]
pub struct AdminCreateMessageRequest {
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
}

/// Message edit payload with an explicit acting user
#[derive(Debug, Deserialize)]
pub struct AdminUpdateMessageRequest {
    pub user_id: Uuid,
    pub content: String,
}

/// Bulk read receipt payload for an explicit receiver
#[derive(Debug, Deserialize)]
pub struct AdminMarkReadRequest {
    pub user_id: Uuid,
    pub message_ids: Vec<Uuid>,
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

/// Browse messages for any sender or receiver
pub async fn get_messages(
    State(state): State<AppState>,
    Query(query): Query<AdminMessageQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = MessageFilter {
        message_id: query.message_id,
        sender_id: query.sender_id,
        receiver_id: query.receiver_id,
    };

    let messages = state.message_service.get_messages(&filter).await?;

    Ok(Json(to_responses(messages)))
}

/// Fetch the conversation between two users
pub async fn get_conversation(
    State(state): State<AppState>,
    Query(query): Query<AdminConversationQuery>,
) -> ApiResult<impl IntoResponse> {
    let messages = state
        .message_service
        .get_conversation(query.user_id, query.other_user_id)
        .await?;

    Ok(Json(to_responses(messages)))
}

/// Send a message on behalf of the given sender
pub async fn create_message(
    State(state): State<AppState>,
    Json(payload): Json<AdminCreateMessageRequest>,
) -> ApiResult<impl IntoResponse> {
    let new_message = NewMessage {
        receiver_id: payload.receiver_id,
        content: payload.content,
    };

    let message = state
        .message_service
        .create_message(payload.sender_id, &new_message)
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(MessageResponse::from(message)),
    ))
}

/// Edit a message acting as its sender
pub async fn update_message(
    State(state): State<AppState>,
    Path(message_id): Path<Uuid>,
    Json(payload): Json<AdminUpdateMessageRequest>,
) -> ApiResult<impl IntoResponse> {
    let message = state
        .message_service
        .update_message(message_id, payload.user_id, &payload.content)
        .await?;

    Ok(Json(MessageResponse::from(message)))
}

/// Mark messages as read on behalf of the given receiver
pub async fn mark_messages_as_read(
    State(state): State<AppState>,
    Json(payload): Json<AdminMarkReadRequest>,
) -> ApiResult<impl IntoResponse> {
    let messages = state
        .message_service
        .mark_messages_as_read(payload.user_id, &payload.message_ids)
        .await?;

    Ok(Json(to_responses(messages)))
}

/// Delete a message acting as its sender
pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<Uuid>,
    Query(query): Query<ActingUserQuery>,
) -> ApiResult<impl IntoResponse> {
    state
        .message_service
        .delete_message(message_id, query.user_id)
        .await?;

    Ok(Json(json!({"message": "Message deleted successfully"})))
}

/// Delete the conversation between two users
pub async fn delete_conversation(
    State(state): State<AppState>,
    Query(query): Query<AdminConversationQuery>,
) -> ApiResult<impl IntoResponse> {
    state
        .message_service
        .delete_conversation(query.user_id, query.other_user_id)
        .await?;

    Ok(Json(json!({"message": "Conversation deleted successfully"})))
}
