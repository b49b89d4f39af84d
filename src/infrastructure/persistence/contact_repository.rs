//! PostgreSQL implementation of ContactRepository

use super::db_err;
use crate::domain::contact::{Contact, ContactData, ContactRepository};
use crate::domain::shared::result::Result;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;

pub struct PgContactRepository {
    pool: PgPool,
}

impl PgContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for PgContactRepository {
    async fn list(&self, user_id: &str) -> Result<Vec<Contact>> {
        let rows = sqlx::query(
            "SELECT id, user_id, name, email, phone, notes FROM contacts \
             WHERE user_id = $1 ORDER BY name ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to list contacts", e))?;

        Ok(rows.iter().map(row_to_contact).collect())
    }

    async fn create(&self, user_id: &str, data: ContactData) -> Result<Contact> {
        let row = sqlx::query(
            r#"
            INSERT INTO contacts (user_id, name, email, phone, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, name, email, phone, notes
            "#,
        )
        .bind(user_id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_err("Failed to create contact", e))?;

        debug!("Created contact for {}", user_id);
        Ok(row_to_contact(&row))
    }

    async fn update(&self, user_id: &str, id: i64, data: ContactData) -> Result<Option<Contact>> {
        let row = sqlx::query(
            r#"
            UPDATE contacts SET name = $1, email = $2, phone = $3, notes = $4
            WHERE id = $5 AND user_id = $6
            RETURNING id, user_id, name, email, phone, notes
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.notes)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Failed to update contact", e))?;

        Ok(row.as_ref().map(row_to_contact))
    }

    async fn delete(&self, user_id: &str, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM contacts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to delete contact", e))?;

        Ok(())
    }
}

fn row_to_contact(row: &PgRow) -> Contact {
    Contact {
        id: row.get::<i32, _>("id") as i64,
        user_id: row.get("user_id"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        notes: row.get("notes"),
    }
}
