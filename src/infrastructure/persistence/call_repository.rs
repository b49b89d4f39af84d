//! PostgreSQL implementation of CallRepository

use super::db_err;
use crate::domain::call::{Call, CallRepository, CallStatus};
use crate::domain::shared::error::DomainError;
use crate::domain::shared::result::Result;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;

const CALL_SELECT: &str = r#"
    SELECT c.id, c.caller_id, c.callee_id, c.status,
           c.created_at, c.answered_at, c.ended_at,
           u_caller.username AS caller_username,
           u_callee.username AS callee_username
    FROM calls c
    JOIN users u_caller ON c.caller_id = u_caller.id
    JOIN users u_callee ON c.callee_id = u_callee.id
"#;

pub struct PgCallRepository {
    pool: PgPool,
}

impl PgCallRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CallRepository for PgCallRepository {
    async fn create(&self, caller_id: &str, callee_id: &str) -> Result<Call> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO calls (caller_id, callee_id, status) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(caller_id)
        .bind(callee_id)
        .bind(CallStatus::Ringing.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_err("Failed to create call", e))?;
        let id = id as i64;

        debug!("Created call {} ({} -> {})", id, caller_id, callee_id);

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::Internal(format!("Call {} vanished after insert", id)))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Call>> {
        let row = sqlx::query(&format!("{CALL_SELECT} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("Failed to fetch call", e))?;

        row.as_ref().map(row_to_call).transpose()
    }

    async fn current_for_user(&self, user_id: &str) -> Result<Option<Call>> {
        let row = sqlx::query(&format!(
            r#"{CALL_SELECT}
            WHERE (c.caller_id = $1 OR c.callee_id = $1)
              AND c.status NOT IN ($2, $3)
            ORDER BY c.created_at DESC
            LIMIT 1
            "#
        ))
        .bind(user_id)
        .bind(CallStatus::Ended.as_str())
        .bind(CallStatus::Declined.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch current call", e))?;

        row.as_ref().map(row_to_call).transpose()
    }

    async fn update(&self, call: &Call) -> Result<()> {
        let result = sqlx::query(
            "UPDATE calls SET status = $1, answered_at = $2, ended_at = $3 WHERE id = $4",
        )
        .bind(call.status.as_str())
        .bind(call.answered_at)
        .bind(call.ended_at)
        .bind(call.id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to update call", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("Call {} not found", call.id)));
        }

        debug!("Call {} is now {}", call.id, call.status.as_str());
        Ok(())
    }
}

fn row_to_call(row: &PgRow) -> Result<Call> {
    let status_str: String = row.get("status");
    let status = CallStatus::parse(&status_str)
        .ok_or_else(|| DomainError::Internal(format!("Unknown call status in store: {}", status_str)))?;

    Ok(Call {
        id: row.get::<i32, _>("id") as i64,
        caller_id: row.get("caller_id"),
        callee_id: row.get("callee_id"),
        caller_username: row.get("caller_username"),
        callee_username: row.get("callee_username"),
        status,
        created_at: row.get("created_at"),
        answered_at: row.get("answered_at"),
        ended_at: row.get("ended_at"),
    })
}
