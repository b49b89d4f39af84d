//! PostgreSQL implementation of UserRepository

use super::db_err;
use crate::domain::shared::error::DomainError;
use crate::domain::shared::result::Result;
use crate::domain::user::{CreateUser, UpdateUser, User, UserRepository, UserRole, UserSummary};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{debug, error};

/// Bcrypt work factor carried over from the original deployment.
const BCRYPT_COST: u32 = 10;

const USER_COLUMNS: &str = "id, username, role, plan, email, sip, billing, \
     chat_enabled, ai_enabled, localmail_enabled";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, data: CreateUser, password: &str) -> Result<User> {
        if data.username.is_empty() || password.is_empty() {
            return Err(DomainError::ValidationError(
                "Username and password are required".to_string(),
            ));
        }

        let id = data.username.to_lowercase();
        let password_hash = hash_password(password)?;
        let plan = serde_json::to_value(&data.plan)
            .map_err(|e| DomainError::Internal(format!("Failed to encode plan: {}", e)))?;
        let billing = serde_json::to_value(&data.billing)
            .map_err(|e| DomainError::Internal(format!("Failed to encode billing: {}", e)))?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users
                (id, username, password_hash, role, plan, email, sip, billing,
                 chat_enabled, ai_enabled, localmail_enabled)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&id)
        .bind(&data.username)
        .bind(&password_hash)
        .bind(data.role.as_str())
        .bind(&plan)
        .bind(&data.email)
        .bind(&data.sip)
        .bind(&billing)
        .bind(data.chat_enabled)
        .bind(data.ai_enabled)
        .bind(data.localmail_enabled)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                DomainError::AlreadyExists(format!("User {} already exists", id))
            }
            other => db_err("Failed to create user", other),
        })?;

        debug!("Created user {}", id);
        row_to_user(&row)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("Failed to fetch user", e))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY role, username"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to list users", e))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn list_chat_enabled(&self) -> Result<Vec<UserSummary>> {
        let rows = sqlx::query(
            "SELECT id, username FROM users WHERE chat_enabled = TRUE ORDER BY username ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to list chat users", e))?;

        Ok(rows.iter().map(row_to_summary).collect())
    }

    async fn list_peers(&self, exclude_id: &str) -> Result<Vec<UserSummary>> {
        let rows = sqlx::query("SELECT id, username FROM users WHERE id != $1 ORDER BY username")
            .bind(exclude_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("Failed to list peers", e))?;

        Ok(rows.iter().map(row_to_summary).collect())
    }

    async fn update(&self, id: &str, data: UpdateUser) -> Result<User> {
        let plan = serde_json::to_value(&data.plan)
            .map_err(|e| DomainError::Internal(format!("Failed to encode plan: {}", e)))?;
        let billing = serde_json::to_value(&data.billing)
            .map_err(|e| DomainError::Internal(format!("Failed to encode billing: {}", e)))?;

        let row = sqlx::query(&format!(
            r#"
            UPDATE users
            SET username = $1, email = $2, sip = $3, plan = $4, billing = $5,
                role = $6, chat_enabled = $7, ai_enabled = $8, localmail_enabled = $9
            WHERE id = $10
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.sip)
        .bind(&plan)
        .bind(&billing)
        .bind(data.role.as_str())
        .bind(data.chat_enabled)
        .bind(data.ai_enabled)
        .bind(data.localmail_enabled)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Failed to update user", e))?;

        match row {
            Some(row) => row_to_user(&row),
            None => Err(DomainError::NotFound(format!("User {} not found", id))),
        }
    }

    async fn set_password(&self, id: &str, password: &str) -> Result<()> {
        let password_hash = hash_password(password)?;

        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(&password_hash)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to set password", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("User {} not found", id)));
        }

        debug!("Password updated for user {}", id);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to delete user", e))?;

        debug!("Deleted user {}", id);
        Ok(())
    }

    async fn verify_credentials(&self, username: &str, password: &str) -> Result<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE lower(username) = $1"
        ))
        .bind(username.to_lowercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch user for login", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let password_hash: String = row.get("password_hash");
        let matches = bcrypt::verify(password, &password_hash).map_err(|e| {
            error!("Password verification failed: {}", e);
            DomainError::Internal(format!("Password verification failed: {}", e))
        })?;

        if !matches {
            return Ok(None);
        }

        row_to_user(&row).map(Some)
    }
}

fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, BCRYPT_COST).map_err(|e| {
        error!("Password hashing failed: {}", e);
        DomainError::Internal(format!("Password hashing failed: {}", e))
    })
}

fn row_to_summary(row: &PgRow) -> UserSummary {
    UserSummary {
        id: row.get("id"),
        username: row.get("username"),
    }
}

fn row_to_user(row: &PgRow) -> Result<User> {
    let role_str: String = row.get("role");
    let role = UserRole::parse(&role_str)
        .ok_or_else(|| DomainError::Internal(format!("Unknown role in store: {}", role_str)))?;

    let plan: serde_json::Value = row.get("plan");
    let plan = serde_json::from_value(plan)
        .map_err(|e| DomainError::Internal(format!("Malformed plan column: {}", e)))?;

    let billing: serde_json::Value = row.get("billing");
    let billing = serde_json::from_value(billing)
        .map_err(|e| DomainError::Internal(format!("Malformed billing column: {}", e)))?;

    Ok(User {
        id: row.get("id"),
        username: row.get("username"),
        role,
        plan,
        email: row.get("email"),
        sip: row.get("sip"),
        billing,
        chat_enabled: row.get("chat_enabled"),
        ai_enabled: row.get("ai_enabled"),
        localmail_enabled: row.get("localmail_enabled"),
    })
}
