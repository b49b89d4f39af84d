//! Voice-room relay
//!
//! Rooms are static rows seeded once. Members toggle a membership row;
//! spoken messages are opaque audio blobs appended to a per-room log
//! and drained by clients polling "messages since my last-seen mark".

use crate::domain::shared::result::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceRoom {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomParticipant {
    pub user_id: String,
    pub username: String,
}

/// One audio blob in a room's append-only log.
#[derive(Debug, Clone)]
pub struct VoiceMessage {
    pub id: i64,
    pub room_id: String,
    pub sender_id: String,
    pub sender_username: String,
    pub audio: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoiceRoomRepository: Send + Sync {
    /// All rooms ordered by name.
    async fn rooms(&self) -> Result<Vec<VoiceRoom>>;

    /// Current membership of a room with usernames joined in.
    async fn participants(&self, room_id: &str) -> Result<Vec<RoomParticipant>>;

    /// Add a membership row; joining twice is a no-op.
    async fn join(&self, room_id: &str, user_id: &str) -> Result<()>;

    /// Remove a membership row; leaving twice is a no-op.
    async fn leave(&self, room_id: &str, user_id: &str) -> Result<()>;

    /// Append an audio blob to the room log.
    async fn post_message(&self, room_id: &str, sender_id: &str, audio: &[u8]) -> Result<()>;

    /// Messages with `created_at` strictly greater than `since`, in
    /// ascending arrival order.
    async fn messages_since(
        &self,
        room_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<VoiceMessage>>;
}
