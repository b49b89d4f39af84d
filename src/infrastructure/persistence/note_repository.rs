//! PostgreSQL implementation of NoteRepository

use super::db_err;
use crate::domain::note::NoteRepository;
use crate::domain::shared::result::Result;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PgNoteRepository {
    pool: PgPool,
}

impl PgNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn get(&self, user_id: &str) -> Result<Option<String>> {
        let content: Option<Option<String>> =
            sqlx::query_scalar("SELECT content FROM notes WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_err("Failed to fetch note", e))?;

        Ok(content.flatten())
    }

    async fn save(&self, user_id: &str, content: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notes (user_id, content, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET content = EXCLUDED.content, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user_id)
        .bind(content)
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to save note", e))?;

        Ok(())
    }
}
