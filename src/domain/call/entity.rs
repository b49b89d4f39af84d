//! Call entity

use crate::domain::call::value_object::CallStatus;
use crate::domain::shared::error::DomainError;
use crate::domain::shared::result::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A signaling row for a two-party call.
///
/// Rows are created in `Ringing`, mutated by either party through
/// [`Call::transition`] and never deleted. `answered_at` is set exactly
/// on entry to `Active`, `ended_at` exactly on entry to `Ended`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Call {
    pub id: i64,
    pub caller_id: String,
    pub callee_id: String,
    /// Usernames joined in from the user directory; absent on rows
    /// that have not been through a joined fetch yet.
    pub caller_username: Option<String>,
    pub callee_username: Option<String>,
    pub status: CallStatus,
    pub created_at: DateTime<Utc>,
    pub answered_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl Call {
    /// Apply a status change, enforcing the legal-transition table.
    ///
    /// Timestamps are side effects of specific transitions only: no
    /// other transition touches `answered_at` or `ended_at`.
    pub fn transition(&mut self, new_status: CallStatus) -> Result<()> {
        if !self.status.can_transition_to(new_status) {
            return Err(DomainError::InvalidStateTransition(format!(
                "Cannot transition call {} from {} to {}",
                self.id,
                self.status.as_str(),
                new_status.as_str()
            )));
        }

        self.status = new_status;
        match new_status {
            CallStatus::Active => self.answered_at = Some(Utc::now()),
            CallStatus::Ended => self.ended_at = Some(Utc::now()),
            _ => {}
        }

        Ok(())
    }

    /// Whether this call involves the given user as either party.
    pub fn involves(&self, user_id: &str) -> bool {
        self.caller_id == user_id || self.callee_id == user_id
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
