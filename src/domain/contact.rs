//! Per-user contact list

use crate::domain::shared::result::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// Contact payload for create and update; `name` is the only required field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactData {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// The user's contacts in ascending name order.
    async fn list(&self, user_id: &str) -> Result<Vec<Contact>>;

    async fn create(&self, user_id: &str, data: ContactData) -> Result<Contact>;

    /// Update a contact; ownership is enforced in the row predicate, so
    /// a foreign ID resolves to not-found rather than leaking.
    async fn update(&self, user_id: &str, id: i64, data: ContactData) -> Result<Option<Contact>>;

    /// Delete a contact owned by the user. Deleting a missing or
    /// foreign row is a no-op.
    async fn delete(&self, user_id: &str, id: i64) -> Result<()>;
}
