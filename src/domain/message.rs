//! Direct messaging and alerts

use crate::domain::shared::result::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A direct message row between two users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectMessage {
    pub id: i64,
    pub sender_id: String,
    pub recipient_id: String,
    pub text: String,
    pub is_read: bool,
    pub timestamp: DateTime<Utc>,
}

/// Digest of one unread message, derived on demand for the alert bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub sender_id: String,
    pub sender_username: String,
    pub message_snippet: String,
}

/// Length of the alert snippet, matching `LEFT(text, 50)`.
pub const ALERT_SNIPPET_LEN: usize = 50;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Insert an unread message from sender to recipient.
    async fn send(&self, sender_id: &str, recipient_id: &str, text: &str)
        -> Result<DirectMessage>;

    /// Fetch the full conversation between the user and a peer in
    /// ascending timestamp order, flipping unread peer-to-user rows to
    /// read as a side effect of the same request. The select and the
    /// mark-read update run in one transaction.
    async fn conversation(&self, user_id: &str, peer_id: &str) -> Result<Vec<DirectMessage>>;

    /// Unread messages addressed to the user, newest first, with the
    /// sender's username and a snippet joined in. Reading alerts marks
    /// nothing; only a conversation fetch flips the read flag.
    async fn alerts(&self, user_id: &str) -> Result<Vec<Alert>>;
}
