//! Internal mail between portal users
//!
//! Addresses look like email but only the local part matters: mail to
//! `bob@lynix.local` lands in the inbox of the user named `bob`.

use crate::domain::shared::result::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalMail {
    pub id: i64,
    pub sender_id: String,
    pub sender_username: String,
    pub recipient_username: String,
    pub subject: String,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}

/// Extract the local part of an address: `bob@lynix.local` -> `bob`.
/// Bare usernames pass through unchanged.
pub fn recipient_local_part(address: &str) -> &str {
    address.split('@').next().unwrap_or(address)
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocalMailRepository: Send + Sync {
    /// Mail addressed to the user's username, newest first.
    async fn inbox(&self, user_id: &str) -> Result<Vec<LocalMail>>;

    /// Mail the user sent, newest first.
    async fn sent(&self, user_id: &str) -> Result<Vec<LocalMail>>;

    /// Insert one row per recipient username.
    async fn send(
        &self,
        sender_id: &str,
        recipient_usernames: &[String],
        subject: &str,
        body: &str,
    ) -> Result<()>;
}
