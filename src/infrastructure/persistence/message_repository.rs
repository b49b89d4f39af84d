//! PostgreSQL implementation of MessageRepository

use super::db_err;
use crate::domain::message::{Alert, DirectMessage, MessageRepository, ALERT_SNIPPET_LEN};
use crate::domain::shared::result::Result;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;

pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn send(
        &self,
        sender_id: &str,
        recipient_id: &str,
        text: &str,
    ) -> Result<DirectMessage> {
        let row = sqlx::query(
            r#"
            INSERT INTO messages (sender_id, recipient_id, text, is_read)
            VALUES ($1, $2, $3, FALSE)
            RETURNING id, sender_id, recipient_id, text, is_read, timestamp
            "#,
        )
        .bind(sender_id)
        .bind(recipient_id)
        .bind(text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_err("Failed to send message", e))?;

        debug!("Message {} -> {}", sender_id, recipient_id);
        Ok(row_to_message(&row))
    }

    async fn conversation(&self, user_id: &str, peer_id: &str) -> Result<Vec<DirectMessage>> {
        // The select and the mark-read update must observe the same
        // rows, so both run inside one transaction.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_err("Failed to open transaction", e))?;

        let rows = sqlx::query(
            r#"
            SELECT id, sender_id, recipient_id, text, is_read, timestamp
            FROM messages
            WHERE (sender_id = $1 AND recipient_id = $2)
               OR (sender_id = $2 AND recipient_id = $1)
            ORDER BY timestamp ASC
            "#,
        )
        .bind(user_id)
        .bind(peer_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| db_err("Failed to fetch conversation", e))?;

        sqlx::query(
            r#"
            UPDATE messages SET is_read = TRUE
            WHERE recipient_id = $1 AND sender_id = $2 AND is_read = FALSE
            "#,
        )
        .bind(user_id)
        .bind(peer_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_err("Failed to mark conversation read", e))?;

        tx.commit()
            .await
            .map_err(|e| db_err("Failed to commit conversation read", e))?;

        Ok(rows.iter().map(row_to_message).collect())
    }

    async fn alerts(&self, user_id: &str) -> Result<Vec<Alert>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT m.sender_id, u.username AS sender_username,
                   LEFT(m.text, {ALERT_SNIPPET_LEN}) AS message_snippet
            FROM messages m
            JOIN users u ON m.sender_id = u.id
            WHERE m.recipient_id = $1 AND m.is_read = FALSE
            ORDER BY m.timestamp DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch alerts", e))?;

        Ok(rows
            .iter()
            .map(|row| Alert {
                sender_id: row.get("sender_id"),
                sender_username: row.get("sender_username"),
                message_snippet: row.get("message_snippet"),
            })
            .collect())
    }
}

fn row_to_message(row: &PgRow) -> DirectMessage {
    DirectMessage {
        id: row.get::<i32, _>("id") as i64,
        sender_id: row.get("sender_id"),
        recipient_id: row.get("recipient_id"),
        text: row.get("text"),
        is_read: row.get("is_read"),
        timestamp: row.get("timestamp"),
    }
}
