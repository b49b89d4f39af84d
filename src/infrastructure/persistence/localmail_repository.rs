//! PostgreSQL implementation of LocalMailRepository

use super::db_err;
use crate::domain::localmail::{LocalMail, LocalMailRepository};
use crate::domain::shared::result::Result;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;

pub struct PgLocalMailRepository {
    pool: PgPool,
}

impl PgLocalMailRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocalMailRepository for PgLocalMailRepository {
    async fn inbox(&self, user_id: &str) -> Result<Vec<LocalMail>> {
        let rows = sqlx::query(
            r#"
            SELECT m.id, m.sender_id, u.username AS sender_username,
                   m.recipient_username, m.subject, m.body, m.timestamp, m.is_read
            FROM localmails m
            JOIN users u ON m.sender_id = u.id
            WHERE m.recipient_username = (SELECT username FROM users WHERE id = $1)
            ORDER BY m.timestamp DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch inbox", e))?;

        Ok(rows.iter().map(row_to_mail).collect())
    }

    async fn sent(&self, user_id: &str) -> Result<Vec<LocalMail>> {
        let rows = sqlx::query(
            r#"
            SELECT m.id, m.sender_id, u.username AS sender_username,
                   m.recipient_username, m.subject, m.body, m.timestamp, m.is_read
            FROM localmails m
            JOIN users u ON m.sender_id = u.id
            WHERE m.sender_id = $1
            ORDER BY m.timestamp DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch sent mail", e))?;

        Ok(rows.iter().map(row_to_mail).collect())
    }

    async fn send(
        &self,
        sender_id: &str,
        recipient_usernames: &[String],
        subject: &str,
        body: &str,
    ) -> Result<()> {
        for recipient in recipient_usernames {
            sqlx::query(
                "INSERT INTO localmails (sender_id, recipient_username, subject, body) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(sender_id)
            .bind(recipient)
            .bind(subject)
            .bind(body)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to send local mail", e))?;
        }

        debug!(
            "Local mail from {} to {} recipient(s)",
            sender_id,
            recipient_usernames.len()
        );
        Ok(())
    }
}

fn row_to_mail(row: &PgRow) -> LocalMail {
    LocalMail {
        id: row.get::<i32, _>("id") as i64,
        sender_id: row.get("sender_id"),
        sender_username: row.get("sender_username"),
        recipient_username: row.get("recipient_username"),
        subject: row.get("subject"),
        body: row.get("body"),
        timestamp: row.get("timestamp"),
        is_read: row.get("is_read"),
    }
}
