//! User repository interface

use super::entity::{CreateUser, UpdateUser, User, UserSummary};
use crate::domain::shared::result::Result;
use async_trait::async_trait;

/// User repository trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user; the plain-text password is hashed by the
    /// implementation and the new ID is the lowercased username.
    async fn create(&self, data: CreateUser, password: &str) -> Result<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    /// List all users, ordered by role then username
    async fn list(&self) -> Result<Vec<User>>;

    /// Directory of chat-enabled users, ascending username
    async fn list_chat_enabled(&self) -> Result<Vec<UserSummary>>;

    /// Directory of callable peers: everyone except the given user
    async fn list_peers(&self, exclude_id: &str) -> Result<Vec<UserSummary>>;

    /// Replace a user's profile row
    async fn update(&self, id: &str, data: UpdateUser) -> Result<User>;

    /// Reset a user's password
    async fn set_password(&self, id: &str, password: &str) -> Result<()>;

    /// Delete a user
    async fn delete(&self, id: &str) -> Result<()>;

    /// Verify credentials; returns the profile on a match, `None` on
    /// unknown username or hash mismatch.
    async fn verify_credentials(&self, username: &str, password: &str) -> Result<Option<User>>;
}
