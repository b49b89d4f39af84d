//! PostgreSQL implementation of SessionRepository

use super::db_err;
use crate::domain::session::{Session, SessionRepository};
use crate::domain::shared::result::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

pub struct PgSessionRepository {
    pool: PgPool,
    ttl: Duration,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool, ttl_seconds: i64) -> Self {
        Self {
            pool,
            ttl: Duration::seconds(ttl_seconds),
        }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create(&self, user_id: &str) -> Result<Session> {
        // Expired rows are invisible to find_valid but would otherwise
        // accumulate forever; each login sweeps them out.
        sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to purge expired sessions", e))?;

        let session = Session {
            token: Uuid::new_v4(),
            user_id: user_id.to_string(),
            created_at: Utc::now(),
            expires_at: Utc::now() + self.ttl,
        };

        sqlx::query(
            "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(session.token)
        .bind(&session.user_id)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to create session", e))?;

        debug!("Created session for user {}", user_id);
        Ok(session)
    }

    async fn find_valid(&self, token: Uuid) -> Result<Option<Session>> {
        let row = sqlx::query(
            "SELECT token, user_id, created_at, expires_at FROM sessions \
             WHERE token = $1 AND expires_at > NOW()",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Failed to look up session", e))?;

        Ok(row.map(|row| Session {
            token: row.get("token"),
            user_id: row.get("user_id"),
            created_at: row.get("created_at"),
            expires_at: row.get("expires_at"),
        }))
    }

    async fn delete(&self, token: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to delete session", e))?;

        Ok(())
    }
}
