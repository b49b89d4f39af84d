//! Voice-room API handlers
//!
//! Audio travels as base64 text over JSON and is stored as raw bytes.
//! Delivery is broadcast-by-polling: every client asks for "messages
//! since my last-seen timestamp" on a timer and plays what arrives.

use super::auth::AuthUser;
use super::error::ApiError;
use super::metrics_handler::record_voice_message;
use super::user_handler::AppState;
use crate::domain::voice_room::{RoomParticipant, VoiceRoom};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    /// Only messages strictly newer than this are returned; absent
    /// means the full backlog.
    pub since: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct PostVoiceMessageRequest {
    pub audio_data: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoiceMessageResponse {
    pub id: i64,
    pub sender_id: String,
    pub sender_username: String,
    pub audio_data: String,
    pub created_at: DateTime<Utc>,
}

/// List all voice rooms
pub async fn list_rooms(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<VoiceRoom>>, ApiError> {
    let rooms = state.voice_rooms.rooms().await?;
    Ok(Json(rooms))
}

/// Current participants of a room
pub async fn list_participants(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(room_id): Path<String>,
) -> Result<Json<Vec<RoomParticipant>>, ApiError> {
    let participants = state.voice_rooms.participants(&room_id).await?;
    Ok(Json(participants))
}

/// Join a room (idempotent)
pub async fn join_room(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(room_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    info!("API: {} joining room {}", auth.user_id, room_id);
    state.voice_rooms.join(&room_id, &auth.user_id).await?;
    Ok(StatusCode::OK)
}

/// Leave a room (idempotent)
pub async fn leave_room(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(room_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    info!("API: {} leaving room {}", auth.user_id, room_id);
    state.voice_rooms.leave(&room_id, &auth.user_id).await?;
    Ok(StatusCode::OK)
}

/// Post an audio blob to a room
pub async fn post_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(room_id): Path<String>,
    Json(req): Json<PostVoiceMessageRequest>,
) -> Result<StatusCode, ApiError> {
    let audio = BASE64
        .decode(&req.audio_data)
        .map_err(|_| ApiError::BadRequest("Invalid base64 audio data.".to_string()))?;

    info!(
        "API: Voice message in {} from {} ({} bytes)",
        room_id,
        auth.user_id,
        audio.len()
    );

    state
        .voice_rooms
        .post_message(&room_id, &auth.user_id, &audio)
        .await?;
    record_voice_message();

    Ok(StatusCode::CREATED)
}

/// Messages strictly newer than the caller's last-seen mark, oldest
/// first, each blob re-encoded for transport.
pub async fn messages_since(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(room_id): Path<String>,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<Vec<VoiceMessageResponse>>, ApiError> {
    let since = query.since.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    let messages = state.voice_rooms.messages_since(&room_id, since).await?;

    let response = messages
        .into_iter()
        .map(|m| VoiceMessageResponse {
            id: m.id,
            sender_id: m.sender_id,
            sender_username: m.sender_username,
            audio_data: BASE64.encode(&m.audio),
            created_at: m.created_at,
        })
        .collect();

    Ok(Json(response))
}
