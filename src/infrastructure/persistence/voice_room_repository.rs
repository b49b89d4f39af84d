//! PostgreSQL implementation of VoiceRoomRepository

use super::db_err;
use crate::domain::shared::result::Result;
use crate::domain::voice_room::{RoomParticipant, VoiceMessage, VoiceRoom, VoiceRoomRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::debug;

pub struct PgVoiceRoomRepository {
    pool: PgPool,
}

impl PgVoiceRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoiceRoomRepository for PgVoiceRoomRepository {
    async fn rooms(&self) -> Result<Vec<VoiceRoom>> {
        let rows = sqlx::query("SELECT id, name FROM voice_rooms ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("Failed to list voice rooms", e))?;

        Ok(rows
            .iter()
            .map(|row| VoiceRoom {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }

    async fn participants(&self, room_id: &str) -> Result<Vec<RoomParticipant>> {
        let rows = sqlx::query(
            r#"
            SELECT p.user_id, u.username
            FROM voice_room_participants p
            JOIN users u ON p.user_id = u.id
            WHERE p.room_id = $1
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to list participants", e))?;

        Ok(rows
            .iter()
            .map(|row| RoomParticipant {
                user_id: row.get("user_id"),
                username: row.get("username"),
            })
            .collect())
    }

    async fn join(&self, room_id: &str, user_id: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO voice_room_participants (room_id, user_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(room_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to join room", e))?;

        debug!("{} joined room {}", user_id, room_id);
        Ok(())
    }

    async fn leave(&self, room_id: &str, user_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM voice_room_participants WHERE room_id = $1 AND user_id = $2")
            .bind(room_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to leave room", e))?;

        debug!("{} left room {}", user_id, room_id);
        Ok(())
    }

    async fn post_message(&self, room_id: &str, sender_id: &str, audio: &[u8]) -> Result<()> {
        sqlx::query(
            "INSERT INTO voice_messages (room_id, sender_id, audio_data) VALUES ($1, $2, $3)",
        )
        .bind(room_id)
        .bind(sender_id)
        .bind(audio)
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to post voice message", e))?;

        debug!("Voice message in {} from {} ({} bytes)", room_id, sender_id, audio.len());
        Ok(())
    }

    async fn messages_since(
        &self,
        room_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<VoiceMessage>> {
        let rows = sqlx::query(
            r#"
            SELECT m.id, m.room_id, m.sender_id, u.username AS sender_username,
                   m.audio_data, m.created_at
            FROM voice_messages m
            JOIN users u ON m.sender_id = u.id
            WHERE m.room_id = $1 AND m.created_at > $2
            ORDER BY m.created_at ASC
            "#,
        )
        .bind(room_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch voice messages", e))?;

        Ok(rows
            .iter()
            .map(|row| VoiceMessage {
                id: row.get::<i32, _>("id") as i64,
                room_id: row.get("room_id"),
                sender_id: row.get("sender_id"),
                sender_username: row.get("sender_username"),
                audio: row.get("audio_data"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}
