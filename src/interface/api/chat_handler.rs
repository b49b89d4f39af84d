//! Direct messaging API handlers

use super::auth::AuthUser;
use super::error::ApiError;
use super::metrics_handler::record_message_sent;
use super::user_handler::AppState;
use crate::domain::message::{Alert, DirectMessage};
use crate::domain::user::UserSummary;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct ConversationQuery {
    pub peer: String,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub recipient_id: String,
    pub text: String,
}

/// Users available for chat
pub async fn chat_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let users = state.users.list_chat_enabled().await?;
    Ok(Json(users))
}

/// Fetch a conversation with a peer in ascending timestamp order.
///
/// Fetching is the acknowledgement: unread messages from the peer are
/// flipped to read by this same request, so the next alert poll no
/// longer reports them.
pub async fn conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ConversationQuery>,
) -> Result<Json<Vec<DirectMessage>>, ApiError> {
    let messages = state
        .messages
        .conversation(&auth.user_id, &query.peer)
        .await?;
    Ok(Json(messages))
}

/// Send a direct message
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<DirectMessage>), ApiError> {
    if req.recipient_id.is_empty() || req.text.is_empty() {
        return Err(ApiError::BadRequest(
            "Recipient and text are required.".to_string(),
        ));
    }

    info!("API: Message {} -> {}", auth.user_id, req.recipient_id);

    let message = state
        .messages
        .send(&auth.user_id, &req.recipient_id, &req.text)
        .await?;
    record_message_sent();

    Ok((StatusCode::CREATED, Json(message)))
}

/// Unread-message digest for the caller, newest first. Reading alerts
/// marks nothing; only opening the conversation does.
pub async fn alerts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Alert>>, ApiError> {
    let alerts = state.messages.alerts(&auth.user_id).await?;
    Ok(Json(alerts))
}
