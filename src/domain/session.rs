//! Server-issued sessions
//!
//! Replaces the portal's historical trust-the-header identity with an
//! opaque token minted at login and checked against the store on every
//! request. The per-request identity contract at each store boundary is
//! unchanged: handlers still operate on a resolved user ID.

use crate::domain::shared::result::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: Uuid,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Mint a new session for the user.
    async fn create(&self, user_id: &str) -> Result<Session>;

    /// Look up a session by token; expired sessions resolve to `None`.
    async fn find_valid(&self, token: Uuid) -> Result<Option<Session>>;

    /// Revoke a session (logout). Unknown tokens are a no-op.
    async fn delete(&self, token: Uuid) -> Result<()>;
}
