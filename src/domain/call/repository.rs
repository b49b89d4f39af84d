//! Call repository interface

use crate::domain::call::entity::Call;
use crate::domain::shared::result::Result;
use async_trait::async_trait;

/// Repository interface for call signaling rows
///
/// Defined in the domain layer as a trait (port) and implemented in the
/// infrastructure layer (adapter).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CallRepository: Send + Sync {
    /// Insert a new ringing call. Deliberately does not check for an
    /// existing in-flight call for either party; two users dialing each
    /// other simultaneously produce two independent rows.
    async fn create(&self, caller_id: &str, callee_id: &str) -> Result<Call>;

    /// Find a call by its ID, with usernames joined in.
    async fn find_by_id(&self, id: i64) -> Result<Option<Call>>;

    /// The most recently created call involving the user (as caller or
    /// callee) whose status is non-terminal.
    async fn current_for_user(&self, user_id: &str) -> Result<Option<Call>>;

    /// Persist status and conditional timestamps of an already
    /// transitioned call.
    async fn update(&self, call: &Call) -> Result<()>;
}
